//! Error types for the prediction pipeline

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Dataset not found: {path:?} ({source})")]
    DatasetNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Training failed: {0}")]
    TrainingFailed(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PipelineError {
    /// Whether the error prevents a session from being created at all.
    ///
    /// Per-request errors (`InvalidInput`, `UnexpectedError`) leave the
    /// session usable; the caller may simply retry with corrected input.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            PipelineError::InvalidInput(_) | PipelineError::UnexpectedError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
