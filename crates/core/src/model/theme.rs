use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::ThemeId;
use crate::model::question::{Question, QuestionDraft, QuestionError};

/// Number of questions every theme carries.
pub const QUESTIONS_PER_THEME: usize = 2;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ThemeError {
    #[error("theme {id} must have exactly {expected} questions, found {found}")]
    QuestionCount {
        id: ThemeId,
        expected: usize,
        found: usize,
    },

    #[error("theme {id} image reference cannot be empty")]
    EmptyImage { id: ThemeId },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── THEME ─────────────────────────────────────────────────────────────────────
//

/// A themed cluster of questions sharing an image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    id: ThemeId,
    image: String,
    questions: Vec<Question>,
}

impl Theme {
    /// Creates a new theme.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::QuestionCount` unless exactly
    /// [`QUESTIONS_PER_THEME`] questions are given, and `EmptyImage` for a
    /// blank image reference.
    pub fn new(
        id: ThemeId,
        image: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, ThemeError> {
        let image = image.into();

        if questions.len() != QUESTIONS_PER_THEME {
            return Err(ThemeError::QuestionCount {
                id,
                expected: QUESTIONS_PER_THEME,
                found: questions.len(),
            });
        }
        if image.trim().is_empty() {
            return Err(ThemeError::EmptyImage { id });
        }

        Ok(Self {
            id,
            image,
            questions,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> ThemeId {
        self.id
    }

    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Wire shape of a theme before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeDraft {
    pub id: u32,
    pub image: String,
    pub questions: Vec<QuestionDraft>,
}

impl ThemeDraft {
    /// Validates the draft into a [`Theme`].
    ///
    /// # Errors
    ///
    /// Returns `ThemeError` when the theme itself or any of its questions is
    /// malformed.
    pub fn validate(self) -> Result<Theme, ThemeError> {
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Theme::new(ThemeId::new(self.id), self.image, questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
