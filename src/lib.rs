//! # Stimgrid
//!
//! Generates seeded visual search stimulus grids for dual-task studies.
//!
//! ## Architecture Overview
//!
//! The crate is split into two layers that run one after the other:
//!
//! - **Generation**: the grid generator turns a set of [`GridParameters`] into one
//!   populated [`Grid`], optionally substituting the target number into a
//!   randomly chosen occupied cell
//! - **Study**: the batch runner reads a [`StudyConfig`], walks every
//!   session/condition/index combination, wraps each grid in a [`GridRecord`]
//!   and writes the whole collection as a single JSON document
//!
//! A single [`rand::rngs::StdRng`] is threaded through every call so a fixed
//! seed reproduces the whole batch (record identifiers excepted).

pub mod generation;
pub mod study;

pub use generation::*;
pub use study::*;

/// Core error type for stimulus generation.
#[derive(thiserror::Error, Debug)]
pub enum StimgridError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values cannot produce a valid grid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation produced a grid that breaks its invariants
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Stimgrid codebase.
pub type StimgridResult<T> = Result<T, StimgridError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version tag written into every grid record.
pub const GRID_FORMAT_VERSION: &str = "2.0";

/// Default values used when the binary runs without arguments.
pub mod defaults {
    /// Configuration file read from the working directory
    pub const CONFIG_FILE: &str = "config.json";

    /// Output file written to the working directory
    pub const OUTPUT_FILE: &str = "output.json";

    /// Seed for the shared random stream
    pub const SEED: u64 = 42;

    /// Indentation used when pretty-printing the output document
    pub const OUTPUT_INDENT: &[u8] = b"    ";
}
