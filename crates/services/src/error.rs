//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BankError, QuizSummaryError};

/// Errors emitted by `BankService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankServiceError {
    #[error("failed to read bank file")]
    Io(#[from] std::io::Error),
    #[error("bank file is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Errors emitted by the session subsystem.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is not finished")]
    NotFinished,
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}
