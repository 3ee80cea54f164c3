//! Engine error model.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// User-surfaceable engine error.
///
/// Two failure families exist at this boundary: reads that could not be
/// served (`FetchFailure`) and writes the directory service rejected
/// (`MutationFailure`). Computation itself never fails — every division
/// guards its denominator and every numeric input is coerced before use.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Loading items, ministries, or a report artifact failed.
    #[error("{0}")]
    FetchFailure(String),

    /// A create/update/delete was rejected by the directory service.
    #[error("{0}")]
    MutationFailure(String),
}

impl EngineError {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchFailure(msg.into())
    }

    pub fn mutation(msg: impl Into<String>) -> Self {
        Self::MutationFailure(msg.into())
    }

    /// The message shown in the single user-visible error slot.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
