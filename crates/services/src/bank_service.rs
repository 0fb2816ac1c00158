use std::fs;
use std::path::Path;

use quiz_core::model::{BankDraft, QuestionBank};

use crate::error::BankServiceError;

/// Boundary loader that turns raw JSON into a validated question bank.
///
/// Malformed banks (wrong counts, answers outside the options, blank
/// fields) are rejected here, before any session exists.
pub struct BankService;

impl BankService {
    /// Parse and validate a bank from a JSON string.
    ///
    /// Themed and flat banks are distinguished by shape alone.
    ///
    /// # Errors
    ///
    /// Returns `BankServiceError::Json` for malformed JSON and
    /// `BankServiceError::Bank` for shape violations.
    pub fn from_json(raw: &str) -> Result<QuestionBank, BankServiceError> {
        let draft: BankDraft = serde_json::from_str(raw)?;
        Ok(draft.validate()?)
    }

    /// Read, parse, and validate a bank file.
    ///
    /// # Errors
    ///
    /// Returns `BankServiceError::Io` when the file cannot be read, plus the
    /// errors of [`Self::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<QuestionBank, BankServiceError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
