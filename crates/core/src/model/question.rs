use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} must have exactly {expected} options, found {found}")]
    OptionCount {
        id: QuestionId,
        expected: usize,
        found: usize,
    },

    #[error("question {id} prompt cannot be empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} has an empty option")]
    EmptyOption { id: QuestionId },

    #[error("question {id} answer is not one of its options")]
    AnswerNotInOptions { id: QuestionId },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// The answer is guaranteed to be one of the options; option order is
/// whatever order the question was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    answer: String,
}

impl Question {
    /// Creates a new question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OptionCount` unless exactly
    /// [`OPTIONS_PER_QUESTION`] options are given, `EmptyPrompt`/`EmptyOption`
    /// for blank text, and `AnswerNotInOptions` when the answer is missing
    /// from the options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let answer = answer.into();

        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuestionError::OptionCount {
                id,
                expected: OPTIONS_PER_QUESTION,
                found: options.len(),
            });
        }
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if options.iter().any(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { id });
        }
        if !options.iter().any(|option| option == &answer) {
            return Err(QuestionError::AnswerNotInOptions { id });
        }

        Ok(Self {
            id,
            prompt,
            options,
            answer,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether the submitted text matches the correct answer exactly.
    #[must_use]
    pub fn is_correct_answer(&self, submitted: &str) -> bool {
        self.answer == submitted
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Wire shape of a question before validation.
///
/// Field names follow the bank file format, where the prompt field is
/// called `question`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionDraft {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionDraft {
    /// Validates the draft into a [`Question`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for any violated invariant; see
    /// [`Question::new`].
    pub fn validate(self) -> Result<Question, QuestionError> {
        Question::new(
            QuestionId::new(self.id),
            self.question,
            self.options,
            self.answer,
        )
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
