//! # Batch Runner
//!
//! Generates every grid of a study and writes them as one document.

use crate::generation::{Generator, GridGenerator};
use crate::study::{render_records, GridRecord, StudyConfig};
use crate::StimgridResult;
use log::{debug, info};
use rand::rngs::StdRng;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Runs the grid generator over every session, condition and grid index.
pub struct BatchRunner {
    config: StudyConfig,
    generator: GridGenerator,
}

impl BatchRunner {
    /// Creates a runner, rejecting configurations that cannot be generated.
    pub fn new(config: StudyConfig) -> StimgridResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            generator: GridGenerator::new(),
        })
    }

    /// Number of records [`BatchRunner::run`] produces.
    pub fn expected_record_count(&self) -> usize {
        self.config.record_count()
    }

    /// Generates all records, session-major, then condition, then grid index.
    ///
    /// Every grid draws from the same random stream in that order, so a fixed
    /// seed reproduces the batch. Nothing is returned unless every grid
    /// generates and validates.
    pub fn run(&self, rng: &mut StdRng) -> StimgridResult<Vec<GridRecord>> {
        let params = &self.config.grid;
        let study = &self.config.study;
        let mut records = Vec::with_capacity(self.expected_record_count());

        info!(
            "Generating {} grids with {} ({} sessions x {} conditions x {} per condition)",
            self.expected_record_count(),
            self.generator.generator_type(),
            study.sessions.len(),
            study.conditions.len(),
            study.number_of_grids_per_condition
        );

        for session in &study.sessions {
            for condition in &study.conditions {
                for index in 0..study.number_of_grids_per_condition {
                    let generated = self.generator.generate(params, rng)?;
                    self.generator.validate(&generated, params)?;

                    debug!(
                        "Generated grid {} for {}/{} (target included: {})",
                        index, session, condition, generated.includes_target
                    );

                    records.push(GridRecord::new(
                        session,
                        condition,
                        params,
                        index,
                        study.number_of_grids_per_condition,
                        generated,
                    ));
                }
            }
        }

        Ok(records)
    }
}

/// Writes records to `path`.
///
/// The document is staged in a temporary file beside `path` and renamed over
/// it, so a failed write never leaves a truncated document behind.
pub fn write_records(path: impl AsRef<Path>, records: &[GridRecord]) -> StimgridResult<()> {
    let path = path.as_ref();
    let document = render_records(records)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&document)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    info!("Wrote {} grids to {}", records.len(), path.display());
    Ok(())
}
