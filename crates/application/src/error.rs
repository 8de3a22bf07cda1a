//! Application error types

use thiserror::Error;

use crate::ports::HttpClientError;

/// Why a scenario step did not pass.
#[derive(Debug, Error)]
pub enum StepError {
    /// A response arrived but did not match expectations.
    #[error("{}", .0.join("; "))]
    Failed(Vec<String>),

    /// No usable response was received.
    #[error(transparent)]
    Transport(#[from] HttpClientError),
}

impl StepError {
    /// Creates a failure carrying a single message.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(vec![message.into()])
    }
}

/// Result type alias for scenario steps.
pub type StepResult<T> = Result<T, StepError>;
