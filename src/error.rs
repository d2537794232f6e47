//! Error types for the asset pipelines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating build assets.
///
/// All of these are fatal: the pipelines perform no retries and leave
/// whatever output existed before the failing step.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to load {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    #[error("Missing build artifact: {0}")]
    MissingArtifact(PathBuf),

    #[error("Failed to write {path}: {message}")]
    OutputWrite { path: PathBuf, message: String },
}

/// Result type for asset pipeline operations.
pub type BuildResult<T> = Result<T, BuildError>;
