//! Pipeline wiring errors.

use quarry_types::QuarryError;
use thiserror::Error;

/// Errors raised while building or running a pool.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// No bar source was supplied.
    #[error("pool has no bar source")]
    MissingBarSource,

    /// No job queue was supplied.
    #[error("pool has no job queue")]
    MissingJobs,

    /// No result queue was supplied.
    #[error("pool has no result queue")]
    MissingResults,

    /// The run was cancelled before the job source was exhausted.
    #[error("pipeline cancelled")]
    Cancelled,
}

impl From<PipelineError> for QuarryError {
    fn from(error: PipelineError) -> Self {
        match error {
            PipelineError::Cancelled => Self::Cancelled,
            other => Self::Config(other.to_string()),
        }
    }
}
