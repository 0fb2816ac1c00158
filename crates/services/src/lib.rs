#![forbid(unsafe_code)]

pub mod bank_service;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use quiz_core::model::QuestionResult;

pub use bank_service::BankService;
pub use error::{BankServiceError, SessionError};

pub use sessions::{
    PlannedQuestion, QuizSession, SessionBuilder, SessionPlan, SessionProgress, ThemeResult,
};
