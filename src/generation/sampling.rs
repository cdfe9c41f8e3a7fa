//! # Sampling
//!
//! Rejection-sampling routines for unique values and grid cells.
//!
//! Each routine checks up front whether an eligible value or cell exists, so
//! the rejection loops below always terminate.

use crate::generation::{Cell, Grid};
use crate::{StimgridError, StimgridResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

/// Draws `count` distinct values from `[min_value, max_value]`, skipping any in `excluded`.
///
/// Values are collected in an ordered set and then shuffled, so the returned
/// order depends only on the random stream.
///
/// # Examples
///
/// ```
/// use stimgrid::generation::{sample_unique_values, utils};
///
/// let mut rng = utils::create_rng(42);
/// let values = sample_unique_values(4, 1, 9, &[5], &mut rng).unwrap();
/// assert_eq!(values.len(), 4);
/// assert!(!values.contains(&5));
/// ```
pub fn sample_unique_values(
    count: usize,
    min_value: i64,
    max_value: i64,
    excluded: &[i64],
    rng: &mut StdRng,
) -> StimgridResult<Vec<i64>> {
    let available = distinct_values_available(min_value, max_value, excluded);
    if count as u128 > available {
        return Err(StimgridError::InvalidConfig(format!(
            "cannot draw {} distinct values from [{}, {}] with {} excluded",
            count,
            min_value,
            max_value,
            excluded.len()
        )));
    }

    let mut values = BTreeSet::new();
    while values.len() < count {
        let candidate = rng.gen_range(min_value..=max_value);
        if excluded.contains(&candidate) {
            continue;
        }
        values.insert(candidate);
    }

    let mut values: Vec<i64> = values.into_iter().collect();
    values.shuffle(rng);
    Ok(values)
}

/// Counts the integers in `[min_value, max_value]` that are not excluded.
pub fn distinct_values_available(min_value: i64, max_value: i64, excluded: &[i64]) -> u128 {
    if min_value > max_value {
        return 0;
    }

    let span = (max_value as i128 - min_value as i128 + 1) as u128;
    let excluded_in_range = excluded
        .iter()
        .filter(|&&value| value >= min_value && value <= max_value)
        .collect::<BTreeSet<_>>()
        .len() as u128;

    span - excluded_in_range
}

/// Draws a uniformly random cell, column first.
pub fn random_cell(grid: &Grid, rng: &mut StdRng) -> Cell {
    let x = rng.gen_range(0..grid.width());
    let y = rng.gen_range(0..grid.height());
    Cell::new(x, y)
}

/// Draws random cells until an empty one is found.
///
/// Returns `None` without drawing when the grid has no empty cell.
pub fn find_empty_cell(grid: &Grid, rng: &mut StdRng) -> Option<Cell> {
    if grid.empty_count() == 0 {
        return None;
    }

    loop {
        let cell = random_cell(grid, rng);
        if grid.is_empty_at(cell) {
            return Some(cell);
        }
    }
}

/// Draws random cells until an occupied one is found.
///
/// Returns `None` without drawing when the grid has no occupied cell.
pub fn find_occupied_cell(grid: &Grid, rng: &mut StdRng) -> Option<Cell> {
    if grid.occupied_count() == 0 {
        return None;
    }

    loop {
        let cell = random_cell(grid, rng);
        if grid.is_occupied_at(cell) {
            return Some(cell);
        }
    }
}
