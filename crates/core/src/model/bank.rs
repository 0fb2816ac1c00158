use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::ThemeId;
use crate::model::question::{Question, QuestionDraft, QuestionError};
use crate::model::theme::{Theme, ThemeDraft, ThemeError};

/// Number of themes in a themed bank.
pub const THEMES_PER_BANK: usize = 5;

/// Number of questions in a flat bank.
pub const QUESTIONS_PER_FLAT_BANK: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("bank must have exactly {expected} themes, found {found}")]
    ThemeCount { expected: usize, found: usize },

    #[error("bank must have exactly {expected} questions, found {found}")]
    QuestionCount { expected: usize, found: usize },

    #[error("bank contains theme id {id} more than once")]
    DuplicateThemeId { id: ThemeId },

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// The full set of questions available to a session.
///
/// Banks are read-only input: sessions copy what they shuffle and never
/// write back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBank {
    /// A fixed number of standalone questions.
    Flat(Vec<Question>),
    /// A fixed number of themes, each carrying its own questions.
    Themed(Vec<Theme>),
}

impl QuestionBank {
    /// Creates a flat bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::QuestionCount` unless exactly
    /// [`QUESTIONS_PER_FLAT_BANK`] questions are given.
    pub fn flat(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.len() != QUESTIONS_PER_FLAT_BANK {
            return Err(BankError::QuestionCount {
                expected: QUESTIONS_PER_FLAT_BANK,
                found: questions.len(),
            });
        }
        Ok(Self::Flat(questions))
    }

    /// Creates a themed bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::ThemeCount` unless exactly [`THEMES_PER_BANK`]
    /// themes are given, and `DuplicateThemeId` when two themes share an id.
    pub fn themed(themes: Vec<Theme>) -> Result<Self, BankError> {
        if themes.len() != THEMES_PER_BANK {
            return Err(BankError::ThemeCount {
                expected: THEMES_PER_BANK,
                found: themes.len(),
            });
        }

        let mut seen = HashSet::new();
        for theme in &themes {
            if !seen.insert(theme.id()) {
                return Err(BankError::DuplicateThemeId { id: theme.id() });
            }
        }

        Ok(Self::Themed(themes))
    }

    /// Total number of questions across the bank.
    #[must_use]
    pub fn question_count(&self) -> usize {
        match self {
            Self::Flat(questions) => questions.len(),
            Self::Themed(themes) => themes.iter().map(|theme| theme.questions().len()).sum(),
        }
    }

    #[must_use]
    pub fn is_themed(&self) -> bool {
        matches!(self, Self::Themed(_))
    }

    /// Themes of the bank; empty for flat banks.
    #[must_use]
    pub fn themes(&self) -> &[Theme] {
        match self {
            Self::Flat(_) => &[],
            Self::Themed(themes) => themes,
        }
    }

    /// Looks up a theme by id.
    #[must_use]
    pub fn theme(&self, id: ThemeId) -> Option<&Theme> {
        self.themes().iter().find(|theme| theme.id() == id)
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Wire shape of a bank before validation.
///
/// The two variants are distinguished by shape alone: themed entries carry
/// an `image` and nested `questions`, flat entries carry `options` directly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BankDraft {
    Themed(Vec<ThemeDraft>),
    Flat(Vec<QuestionDraft>),
}

impl BankDraft {
    /// Validates the draft into a [`QuestionBank`].
    ///
    /// # Errors
    ///
    /// Returns `BankError` naming the first violated invariant.
    pub fn validate(self) -> Result<QuestionBank, BankError> {
        match self {
            Self::Themed(themes) => {
                let themes = themes
                    .into_iter()
                    .map(ThemeDraft::validate)
                    .collect::<Result<Vec<_>, _>>()?;
                QuestionBank::themed(themes)
            }
            Self::Flat(questions) => {
                let questions = questions
                    .into_iter()
                    .map(QuestionDraft::validate)
                    .collect::<Result<Vec<_>, _>>()?;
                QuestionBank::flat(questions)
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;

    fn build_question(id: u32) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            "a",
        )
        .unwrap()
    }

    fn build_theme(id: u32) -> Theme {
        Theme::new(
            ThemeId::new(id),
            format!("/images/{id}.png"),
            vec![build_question(id * 10), build_question(id * 10 + 1)],
        )
        .unwrap()
    }

    #[test]
    fn themed_bank_happy_path() {
        let bank = QuestionBank::themed((1..=5).map(build_theme).collect()).unwrap();

        assert!(bank.is_themed());
        assert_eq!(bank.question_count(), 10);
        assert_eq!(bank.themes().len(), THEMES_PER_BANK);
        assert!(bank.theme(ThemeId::new(3)).is_some());
        assert!(bank.theme(ThemeId::new(99)).is_none());
    }

    #[test]
    fn flat_bank_happy_path() {
        let bank = QuestionBank::flat((1..=10).map(build_question).collect()).unwrap();

        assert!(!bank.is_themed());
        assert_eq!(bank.question_count(), QUESTIONS_PER_FLAT_BANK);
        assert!(bank.themes().is_empty());
    }

    #[test]
    fn themed_bank_rejects_wrong_theme_count() {
        let err = QuestionBank::themed((1..=4).map(build_theme).collect()).unwrap_err();
        assert_eq!(
            err,
            BankError::ThemeCount {
                expected: THEMES_PER_BANK,
                found: 4,
            }
        );
    }

    #[test]
    fn themed_bank_rejects_duplicate_ids() {
        let themes = vec![
            build_theme(1),
            build_theme(2),
            build_theme(3),
            build_theme(4),
            build_theme(1),
        ];
        let err = QuestionBank::themed(themes).unwrap_err();
        assert_eq!(err, BankError::DuplicateThemeId { id: ThemeId::new(1) });
    }

    #[test]
    fn flat_bank_rejects_wrong_question_count() {
        let err = QuestionBank::flat((1..=9).map(build_question).collect()).unwrap_err();
        assert_eq!(
            err,
            BankError::QuestionCount {
                expected: QUESTIONS_PER_FLAT_BANK,
                found: 9,
            }
        );
    }

    #[test]
    fn draft_validation_surfaces_nested_errors() {
        let themes = (1..=5)
            .map(|id| ThemeDraft {
                id,
                image: "img".into(),
                questions: vec![
                    QuestionDraft {
                        id: id * 10,
                        question: format!("Q{id}"),
                        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                        // Wrong on purpose for theme 3.
                        answer: if id == 3 { "zzz".into() } else { "a".into() },
                    },
                    QuestionDraft {
                        id: id * 10 + 1,
                        question: format!("Q{id}b"),
                        options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                        answer: "b".into(),
                    },
                ],
            })
            .collect();

        let err = BankDraft::Themed(themes).validate().unwrap_err();
        assert!(matches!(err, BankError::Theme(ThemeError::Question(_))));
    }
}
