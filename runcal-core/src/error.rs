//! Error types for the runcal ecosystem.

use thiserror::Error;

/// Errors that can occur in runcal operations.
#[derive(Error, Debug)]
pub enum RunCalError {
    #[error("Malformed shift row: {0}")]
    MalformedShift(String),

    #[error("No shifts found in the schedule")]
    EmptyBatch,

    #[error("Schedule parse error: {0}")]
    ScheduleParse(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Remote calendar error: {0}")]
    Remote(String),
}

/// Result type alias for runcal operations.
pub type RunCalResult<T> = Result<T, RunCalError>;
