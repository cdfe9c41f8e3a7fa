//! # Stimulus Grid Generation
//!
//! Fills a grid with unique random stimuli and, with a configured
//! probability, swaps one of them for the target number.

use crate::generation::{
    find_empty_cell, find_occupied_cell, sample_unique_values, Generator, Grid, GridParameters,
};
use crate::{StimgridError, StimgridResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A generated grid together with whether the target number ended up in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedGrid {
    /// The populated grid
    pub grid: Grid,
    /// Whether one stimulus was overwritten with the target number
    pub includes_target: bool,
}

/// Generator for visual search stimulus grids.
///
/// Draws from the random stream in a fixed order: stimulus values, their
/// shuffle, placement cells, the inclusion trial, then the substitution cell.
///
/// # Examples
///
/// ```
/// use stimgrid::{Generator, GridGenerator, GridParameters};
/// use stimgrid::generation::utils;
///
/// let params = GridParameters::new(3, 3, 1, 9, 5, 1.0, 4);
/// let mut rng = utils::create_rng(42);
///
/// let generated = GridGenerator::new().generate(&params, &mut rng).unwrap();
/// assert_eq!(generated.grid.occupied_count(), 4);
/// assert!(generated.includes_target);
/// assert_eq!(generated.grid.count_of(5), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GridGenerator;

impl GridGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Places each value into a random empty cell.
    fn place_stimuli(
        &self,
        grid: &mut Grid,
        values: &[i64],
        rng: &mut StdRng,
    ) -> StimgridResult<()> {
        for &value in values {
            let cell = find_empty_cell(grid, rng).ok_or_else(|| {
                StimgridError::GenerationFailed(format!("no empty cell left for stimulus {value}"))
            })?;
            grid.set(cell, Some(value));
        }
        Ok(())
    }

    /// Runs the inclusion trial and overwrites one stimulus with the target on success.
    ///
    /// The trial is always drawn. A grid with no stimuli has nothing to
    /// overwrite and is left without the target.
    fn substitute_target(
        &self,
        grid: &mut Grid,
        params: &GridParameters,
        rng: &mut StdRng,
    ) -> bool {
        let should_insert = rng.gen::<f64>() < params.target_number_inclusion_probability;
        if !should_insert {
            return false;
        }

        match find_occupied_cell(grid, rng) {
            Some(cell) => {
                grid.set(cell, Some(params.target_number));
                true
            }
            None => false,
        }
    }
}

impl Generator<GeneratedGrid> for GridGenerator {
    fn generate(&self, params: &GridParameters, rng: &mut StdRng) -> StimgridResult<GeneratedGrid> {
        params.validate()?;

        let mut grid = Grid::new(params.width, params.height);

        let values = sample_unique_values(
            params.number_of_stimuli,
            params.min_value,
            params.max_value,
            &[params.target_number],
            rng,
        )?;

        self.place_stimuli(&mut grid, &values, rng)?;
        let includes_target = self.substitute_target(&mut grid, params, rng);

        Ok(GeneratedGrid {
            grid,
            includes_target,
        })
    }

    fn validate(&self, content: &GeneratedGrid, params: &GridParameters) -> StimgridResult<()> {
        let grid = &content.grid;

        if grid.width() != params.width || grid.cell_count() != params.width * params.height {
            return Err(StimgridError::GenerationFailed(format!(
                "grid is {}x{}, expected {}x{}",
                grid.width(),
                grid.height(),
                params.width,
                params.height
            )));
        }

        if grid.occupied_count() != params.number_of_stimuli {
            return Err(StimgridError::GenerationFailed(format!(
                "grid holds {} values, expected {}",
                grid.occupied_count(),
                params.number_of_stimuli
            )));
        }

        let mut seen = HashSet::new();
        for value in grid.values() {
            // The target may sit outside the stimulus range
            if value != params.target_number && !params.contains_value(value) {
                return Err(StimgridError::GenerationFailed(format!(
                    "value {} lies outside [{}, {}]",
                    value, params.min_value, params.max_value
                )));
            }
            if !seen.insert(value) {
                return Err(StimgridError::GenerationFailed(format!(
                    "value {} appears more than once",
                    value
                )));
            }
        }

        let expected_targets = usize::from(content.includes_target);
        let targets = grid.count_of(params.target_number);
        if targets != expected_targets {
            return Err(StimgridError::GenerationFailed(format!(
                "target {} appears {} times, expected {}",
                params.target_number, targets, expected_targets
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "GridGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::generation::Cell;

    fn generate(params: &GridParameters, seed: u64) -> GeneratedGrid {
        let mut rng = create_rng(seed);
        GridGenerator::new().generate(params, &mut rng).unwrap()
    }

    #[test]
    fn test_example_grid_always_includes_target() {
        let params = GridParameters::new(3, 3, 1, 9, 5, 1.0, 4);

        for seed in 0..50 {
            let generated = generate(&params, seed);
            assert!(generated.includes_target);
            assert_eq!(generated.grid.occupied_count(), 4);
            assert_eq!(generated.grid.empty_count(), 5);
            assert_eq!(generated.grid.count_of(5), 1);
            assert!(GridGenerator::new().validate(&generated, &params).is_ok());
        }
    }

    #[test]
    fn test_zero_probability_never_includes_target() {
        let params = GridParameters::new(5, 5, 1, 50, 7, 0.0, 10);

        for seed in 0..50 {
            let generated = generate(&params, seed);
            assert!(!generated.includes_target);
            assert_eq!(generated.grid.count_of(7), 0);
            assert_eq!(generated.grid.occupied_count(), 10);
        }
    }

    #[test]
    fn test_even_odds_include_target_about_half_the_time() {
        let params = GridParameters::new(5, 5, 1, 50, 7, 0.5, 10);
        let generator = GridGenerator::new();
        let mut rng = create_rng(42);

        let trials = 2000;
        let mut included = 0;
        for _ in 0..trials {
            let generated = generator.generate(&params, &mut rng).unwrap();
            assert_eq!(generated.grid.count_of(7), usize::from(generated.includes_target));
            if generated.includes_target {
                included += 1;
            }
        }

        // Binomial(2000, 0.5) has a standard deviation of about 22
        assert!(
            (900..=1100).contains(&included),
            "target included in {} of {} grids",
            included,
            trials
        );
    }

    #[test]
    fn test_inclusion_rate_tracks_probability() {
        let generator = GridGenerator::new();
        let mut rng = create_rng(42);

        let mut rate = |probability: f64| {
            let params = GridParameters::new(4, 4, 1, 40, 3, probability, 6);
            let included = (0..1000)
                .filter(|_| generator.generate(&params, &mut rng).unwrap().includes_target)
                .count();
            included as f64 / 1000.0
        };

        let low = rate(0.2);
        let high = rate(0.8);
        assert!((0.15..=0.25).contains(&low), "rate at 0.2 was {}", low);
        assert!((0.75..=0.85).contains(&high), "rate at 0.8 was {}", high);
    }

    #[test]
    fn test_full_grid_substitutes_into_occupied_cell() {
        let params = GridParameters::new(3, 3, 1, 20, 5, 1.0, 9);

        let generated = generate(&params, 11);
        assert!(generated.grid.is_full());
        assert!(generated.includes_target);
        assert_eq!(generated.grid.count_of(5), 1);
        assert!(GridGenerator::new().validate(&generated, &params).is_ok());
    }

    #[test]
    fn test_no_stimuli_leaves_grid_empty() {
        let params = GridParameters::new(4, 4, 1, 9, 5, 1.0, 0);

        let generated = generate(&params, 3);
        assert!(!generated.includes_target);
        assert_eq!(generated.grid.occupied_count(), 0);
        assert!(GridGenerator::new().validate(&generated, &params).is_ok());
    }

    #[test]
    fn test_same_seed_same_grid() {
        let params = GridParameters::new(6, 4, 10, 99, 42, 0.5, 12);
        assert_eq!(generate(&params, 42), generate(&params, 42));
    }

    #[test]
    fn test_infeasible_parameters_fail_fast() {
        let mut rng = create_rng(1);
        let params = GridParameters::new(3, 3, 1, 9, 5, 0.5, 9);
        let result = GridGenerator::new().generate(&params, &mut rng);
        assert!(matches!(result, Err(StimgridError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_catches_broken_grids() {
        let params = GridParameters::new(2, 2, 1, 9, 5, 0.5, 2);
        let generator = GridGenerator::new();

        let mut grid = Grid::new(2, 2);
        grid.set(Cell::new(0, 0), Some(3));
        grid.set(Cell::new(1, 1), Some(3));
        let duplicate = GeneratedGrid {
            grid,
            includes_target: false,
        };
        assert!(generator.validate(&duplicate, &params).is_err());

        let mut grid = Grid::new(2, 2);
        grid.set(Cell::new(0, 0), Some(3));
        grid.set(Cell::new(1, 1), Some(5));
        let unflagged_target = GeneratedGrid {
            grid: grid.clone(),
            includes_target: false,
        };
        assert!(generator.validate(&unflagged_target, &params).is_err());

        let flagged_target = GeneratedGrid {
            grid,
            includes_target: true,
        };
        assert!(generator.validate(&flagged_target, &params).is_ok());

        let mut grid = Grid::new(2, 2);
        grid.set(Cell::new(0, 0), Some(3));
        grid.set(Cell::new(1, 1), Some(10));
        let out_of_range = GeneratedGrid {
            grid,
            includes_target: false,
        };
        assert!(generator.validate(&out_of_range, &params).is_err());
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(GridGenerator::new().generator_type(), "GridGenerator");
    }
}
