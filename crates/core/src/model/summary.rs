use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::result::QuestionResult;
use crate::model::score::{ScoreCategory, score_percentage};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many results for a single quiz: {len}")]
    TooManyResults { len: usize },

    #[error("correct count ({correct}) exceeds total questions ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },
}

/// Aggregate summary for a finished quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total_questions: u32,
    correct: u32,
}

impl QuizSummary {
    /// Build a summary from explicit counts.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is
    /// before `started_at`, and `CorrectExceedsTotal` when counts do not
    /// align.
    pub fn from_counts(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        total_questions: u32,
        correct: u32,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        if correct > total_questions {
            return Err(QuizSummaryError::CorrectExceedsTotal {
                correct,
                total: total_questions,
            });
        }

        Ok(Self {
            started_at,
            completed_at,
            total_questions,
            correct,
        })
    }

    /// Build a summary from the recorded per-question results.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::TooManyResults` if the result count cannot
    /// fit in `u32`, plus the validation errors of [`Self::from_counts`].
    pub fn from_results(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        results: &[QuestionResult],
    ) -> Result<Self, QuizSummaryError> {
        let total_questions = u32::try_from(results.len())
            .map_err(|_| QuizSummaryError::TooManyResults { len: results.len() })?;
        let correct = results
            .iter()
            .filter(|result| result.is_correct)
            .count() as u32;

        Self::from_counts(started_at, completed_at, total_questions, correct)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    /// Rounded percentage of correct answers.
    #[must_use]
    pub fn score_percentage(&self) -> u8 {
        score_percentage(self.correct, self.total_questions)
    }

    /// Verdict band for this attempt.
    #[must_use]
    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::from_percentage(self.score_percentage())
    }
}
