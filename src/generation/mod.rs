//! # Generation Module
//!
//! Stimulus grid generation: the parameters a grid is built from, the grid
//! itself, and the sampling routines that fill it.
//!
//! Every routine takes the random number generator explicitly so a batch can
//! share one seeded stream and stay reproducible.

pub mod grid;
pub mod sampling;
pub mod stimulus;

pub use grid::*;
pub use sampling::*;
pub use stimulus::*;

use crate::{StimgridError, StimgridResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Parameters describing a single grid.
///
/// Deserializes directly from the `grid` object of the study configuration,
/// so field names follow the camelCase keys of that file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridParameters {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Smallest value a stimulus may take (inclusive)
    pub min_value: i64,
    /// Largest value a stimulus may take (inclusive)
    pub max_value: i64,
    /// Value whose presence participants search for
    pub target_number: i64,
    /// Probability (0.0 to 1.0) that the target replaces one stimulus
    pub target_number_inclusion_probability: f64,
    /// Number of cells to fill with unique non-target values
    pub number_of_stimuli: usize,
}

impl GridParameters {
    /// Creates parameters for a grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use stimgrid::GridParameters;
    ///
    /// let params = GridParameters::new(3, 3, 1, 9, 5, 1.0, 4);
    /// assert_eq!(params.cell_count(), 9);
    /// assert!(params.validate().is_ok());
    /// ```
    pub fn new(
        width: usize,
        height: usize,
        min_value: i64,
        max_value: i64,
        target_number: i64,
        target_number_inclusion_probability: f64,
        number_of_stimuli: usize,
    ) -> Self {
        Self {
            width,
            height,
            min_value,
            max_value,
            target_number,
            target_number_inclusion_probability,
            number_of_stimuli,
        }
    }

    /// Total number of cells in the grid.
    pub fn cell_count(&self) -> u128 {
        self.width as u128 * self.height as u128
    }

    /// Number of distinct values a stimulus can take, target excluded.
    pub fn available_value_count(&self) -> u128 {
        distinct_values_available(self.min_value, self.max_value, &[self.target_number])
    }

    /// Checks if a value lies within `[min_value, max_value]`.
    pub fn contains_value(&self, value: i64) -> bool {
        value >= self.min_value && value <= self.max_value
    }

    /// Checks that a grid can be generated from these parameters.
    ///
    /// The sampling and placement loops only terminate when there is room
    /// for every stimulus and enough distinct values to draw from, so both
    /// are checked up front.
    pub fn validate(&self) -> StimgridResult<()> {
        if self.min_value > self.max_value {
            return Err(StimgridError::InvalidConfig(format!(
                "minValue ({}) is greater than maxValue ({})",
                self.min_value, self.max_value
            )));
        }

        let probability = self.target_number_inclusion_probability;
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(StimgridError::InvalidConfig(format!(
                "targetNumberInclusionProbability must be within [0, 1], got {}",
                probability
            )));
        }

        let stimuli = self.number_of_stimuli as u128;
        if stimuli > self.cell_count() {
            return Err(StimgridError::InvalidConfig(format!(
                "numberOfStimuli ({}) exceeds the {}x{} grid's {} cells",
                self.number_of_stimuli,
                self.width,
                self.height,
                self.cell_count()
            )));
        }

        let available = self.available_value_count();
        if stimuli > available {
            return Err(StimgridError::InvalidConfig(format!(
                "numberOfStimuli ({}) exceeds the {} distinct values in [{}, {}] \
                 excluding target {}",
                self.number_of_stimuli,
                available,
                self.min_value,
                self.max_value,
                self.target_number
            )));
        }

        Ok(())
    }
}

/// Trait for stimulus generators.
///
/// Generators produce content from [`GridParameters`] using a caller-owned
/// random stream, and can check their own output against those parameters.
pub trait Generator<T> {
    /// Generates content using the provided parameters and random number generator.
    fn generate(&self, params: &GridParameters, rng: &mut StdRng) -> StimgridResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, params: &GridParameters) -> StimgridResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}
