//! # Study Module
//!
//! Study configuration, grid records, and the batch runner that ties them to
//! the grid generator.
//!
//! The configuration file uses the nested layout:
//!
//! ```json
//! {
//!     "grid": {
//!         "width": 5, "height": 5,
//!         "minValue": 10, "maxValue": 99,
//!         "targetNumber": 42,
//!         "targetNumberInclusionProbability": 0.5,
//!         "numberOfStimuli": 12
//!     },
//!     "study": {
//!         "conditions": ["Visual Search", "Visual Search + HUD"],
//!         "numberOfGridsPerCondition": 10,
//!         "sessions": ["training", "testing"]
//!     }
//! }
//! ```

pub mod batch;
pub mod record;

pub use batch::*;
pub use record::*;

use crate::{GridParameters, StimgridResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Session, condition and repetition settings of a study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySettings {
    /// Experimental treatment labels, e.g. with and without a HUD
    pub conditions: Vec<String>,
    /// Grids generated for each session/condition pair
    pub number_of_grids_per_condition: usize,
    /// Phase labels, e.g. training and testing
    pub sessions: Vec<String>,
}

/// Complete configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    pub grid: GridParameters,
    pub study: StudySettings,
}

impl StudyConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> StimgridResult<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Examples
    ///
    /// ```
    /// use stimgrid::StudyConfig;
    ///
    /// let config = StudyConfig::from_json_str(r#"{
    ///     "grid": {"width": 3, "height": 3, "minValue": 1, "maxValue": 9,
    ///              "targetNumber": 5, "targetNumberInclusionProbability": 1.0,
    ///              "numberOfStimuli": 4},
    ///     "study": {"conditions": ["a"], "numberOfGridsPerCondition": 2,
    ///               "sessions": ["training", "testing"]}
    /// }"#).unwrap();
    /// assert_eq!(config.record_count(), 4);
    /// ```
    pub fn from_json_str(json: &str) -> StimgridResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every grid of the study can be generated.
    pub fn validate(&self) -> StimgridResult<()> {
        self.grid.validate()
    }

    /// Number of records a run produces.
    pub fn record_count(&self) -> usize {
        self.study.sessions.len()
            * self.study.conditions.len()
            * self.study.number_of_grids_per_condition
    }
}
