use crate::model::ids::{QuestionId, ThemeId};

/// Record of a single answered question.
///
/// Snapshots the question as it was presented (options in presentation
/// order) together with the submitted answer. Created once per question and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResult {
    pub question_id: QuestionId,
    pub prompt: String,
    /// Options in the order they were shown.
    pub options: Vec<String>,
    pub answer: String,
    pub user_answer: String,
    pub is_correct: bool,
    /// Owning theme when the bank is themed.
    pub theme_id: Option<ThemeId>,
}

impl QuestionResult {
    /// Builds a result, deriving correctness from exact string equality
    /// between the submitted and the correct answer.
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        user_answer: impl Into<String>,
        theme_id: Option<ThemeId>,
    ) -> Self {
        let answer = answer.into();
        let user_answer = user_answer.into();
        let is_correct = answer == user_answer;

        Self {
            question_id,
            prompt: prompt.into(),
            options,
            answer,
            user_answer,
            is_correct,
            theme_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["a".into(), "b".into(), "c".into(), "d".into()]
    }

    #[test]
    fn correct_submission_is_flagged() {
        let result = QuestionResult::new(QuestionId::new(1), "Pick", options(), "b", "b", None);
        assert!(result.is_correct);
    }

    #[test]
    fn wrong_submission_is_flagged() {
        let result = QuestionResult::new(
            QuestionId::new(1),
            "Pick",
            options(),
            "b",
            "c",
            Some(ThemeId::new(4)),
        );
        assert!(!result.is_correct);
        assert_eq!(result.theme_id, Some(ThemeId::new(4)));
    }

    #[test]
    fn equality_is_case_sensitive() {
        let result = QuestionResult::new(QuestionId::new(1), "Pick", options(), "b", "B", None);
        assert!(!result.is_correct);
    }
}
