use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;

use quiz_core::Clock;
use quiz_core::model::{
    QuestionBank, QuestionResult, QuizSummary, ScoreCategory, score_percentage,
};

use super::plan::{PlannedQuestion, SessionBuilder, SessionPlan};
use super::progress::SessionProgress;
use super::results::{ThemeResult, group_by_theme};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state machine for one quiz attempt.
///
/// Owns the shuffled question sequence and everything recorded against it.
/// The machine steps forward one question per [`advance`](Self::advance)
/// call and becomes terminal after the last question; [`restart`](Self::restart)
/// reshuffles and wipes every trace of the previous attempt.
///
/// Precondition violations (advancing with nothing selected, advancing a
/// finished session) are silent no-ops rather than errors: they are only
/// reachable through presentation-layer sequencing mistakes.
pub struct QuizSession {
    bank: QuestionBank,
    questions: Vec<PlannedQuestion>,
    current: usize,
    pending_answer: Option<String>,
    results: Vec<QuestionResult>,
    correct: u32,
    finished: bool,
    clock: Clock,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session over the given bank, shuffled and positioned at the
    /// first question.
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        let clock = Clock::default_clock();
        let questions = SessionBuilder::new(&bank).build();
        Self::from_plan(bank, questions, clock)
    }

    /// Replace the session clock; timestamps restart from the new clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.started_at = clock.now();
        self
    }

    fn from_plan(bank: QuestionBank, plan: SessionPlan, clock: Clock) -> Self {
        let mut session = Self {
            bank,
            questions: Vec::new(),
            current: 0,
            pending_answer: None,
            results: Vec::new(),
            correct: 0,
            finished: false,
            clock,
            started_at: clock.now(),
            completed_at: None,
        };
        session.reset(plan);
        session
    }

    /// Reshuffle and start over; nothing from the previous attempt survives.
    pub fn restart(&mut self) {
        let plan = SessionBuilder::new(&self.bank).build();
        self.reset(plan);
    }

    /// Deterministic variant of [`restart`](Self::restart) for tests.
    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let plan = SessionBuilder::new(&self.bank).build_with_rng(rng);
        self.reset(plan);
    }

    fn reset(&mut self, plan: SessionPlan) {
        self.questions = plan.questions().to_vec();
        self.current = 0;
        self.pending_answer = None;
        self.results = Vec::new();
        self.correct = 0;
        self.finished = false;
        self.started_at = self.clock.now();
        self.completed_at = None;
    }

    //
    // ─── DERIVED VIEWS ─────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question at the current position.
    ///
    /// After the session finishes, the position stays on the last question.
    #[must_use]
    pub fn current_question(&self) -> Option<&PlannedQuestion> {
        self.questions.get(self.current)
    }

    /// Image of the theme owning the current question, for themed banks.
    #[must_use]
    pub fn current_theme_image(&self) -> Option<&str> {
        self.current_question()
            .and_then(PlannedQuestion::theme_image)
    }

    /// True when the current position is the last valid one and a current
    /// question exists.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_question().is_some() && self.current + 1 == self.questions.len()
    }

    /// Total number of questions in this attempt.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Number of questions that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.results.len()
    }

    /// Number of questions still unanswered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.questions.len().saturating_sub(self.results.len())
    }

    /// The answer selected for the current question, if any.
    #[must_use]
    pub fn pending_answer(&self) -> Option<&str> {
        self.pending_answer.as_deref()
    }

    /// True when an answer has been selected and the session can advance.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.pending_answer.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Running count of correct answers.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.correct
    }

    /// Rounded percentage of correct answers so far; 0 for an empty plan.
    #[must_use]
    pub fn score_percentage(&self) -> u8 {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        score_percentage(self.correct, total)
    }

    /// Verdict band for the current percentage.
    #[must_use]
    pub fn score_category(&self) -> ScoreCategory {
        ScoreCategory::from_percentage(self.score_percentage())
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_questions(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            correct: self.correct,
            is_finished: self.finished,
        }
    }

    /// Results recorded so far, in submission order.
    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    /// Results grouped by owning theme, ordered by ascending theme id.
    ///
    /// Empty for flat banks and before the first answer lands.
    #[must_use]
    pub fn results_by_theme(&self) -> Vec<ThemeResult> {
        group_by_theme(&self.bank, &self.results)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Aggregate summary of a finished attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotFinished` while questions remain.
    pub fn summary(&self) -> Result<QuizSummary, SessionError> {
        let completed_at = self.completed_at.ok_or(SessionError::NotFinished)?;
        Ok(QuizSummary::from_results(
            self.started_at,
            completed_at,
            &self.results,
        )?)
    }

    //
    // ─── ACTIONS ───────────────────────────────────────────────────────────────
    //

    /// Select an answer for the current question.
    ///
    /// A blank selection clears the pending answer instead of storing it, so
    /// an empty choice can never be submitted.
    pub fn select_answer(&mut self, answer: impl Into<String>) {
        let answer = answer.into();
        self.pending_answer = if answer.trim().is_empty() {
            None
        } else {
            Some(answer)
        };
    }

    /// Drop the pending answer for the current question.
    pub fn clear_answer(&mut self) {
        self.pending_answer = None;
    }

    /// Submit the pending answer and step the machine.
    ///
    /// Records a [`QuestionResult`] for the current question and either
    /// moves to the next question (clearing the pending answer) or, on the
    /// last question, marks the session finished without moving the
    /// position.
    ///
    /// Returns the recorded result, or `None` when the call was a no-op:
    /// session already finished, no current question, or nothing selected.
    pub fn advance(&mut self) -> Option<&QuestionResult> {
        if self.finished || self.current >= self.questions.len() {
            return None;
        }
        let answer = self.pending_answer.clone()?;

        let question = &self.questions[self.current];
        let result = QuestionResult::new(
            question.id(),
            question.prompt(),
            question.options().to_vec(),
            question.answer(),
            answer,
            question.theme_id(),
        );

        if result.is_correct {
            self.correct += 1;
        }
        self.results.push(result);

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.pending_answer = None;
        } else {
            self.finished = true;
            self.completed_at = Some(self.clock.now());
        }

        self.results.last()
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("results_len", &self.results.len())
            .field("correct", &self.correct)
            .field("finished", &self.finished)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionId, Theme, ThemeId};
    use quiz_core::time::{fixed_clock, fixed_now};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_question(id: u32) -> Question {
        Question::new(
            QuestionId::new(id),
            format!("Q{id}"),
            vec![
                format!("opt-{id}-a"),
                format!("opt-{id}-b"),
                format!("opt-{id}-c"),
                format!("opt-{id}-d"),
            ],
            format!("opt-{id}-a"),
        )
        .unwrap()
    }

    fn themed_bank() -> QuestionBank {
        let themes = (1..=5)
            .map(|id| {
                Theme::new(
                    ThemeId::new(id),
                    format!("/images/{id}.png"),
                    vec![build_question(id * 10), build_question(id * 10 + 1)],
                )
                .unwrap()
            })
            .collect();
        QuestionBank::themed(themes).unwrap()
    }

    fn flat_bank() -> QuestionBank {
        QuestionBank::flat((1..=10).map(build_question).collect()).unwrap()
    }

    fn build_session(bank: QuestionBank, seed: u64) -> QuizSession {
        let mut session = QuizSession::new(bank).with_clock(fixed_clock());
        session.restart_with_rng(&mut StdRng::seed_from_u64(seed));
        session
    }

    fn answer_current(session: &mut QuizSession, correctly: bool) {
        let question = session.current_question().expect("question available");
        let answer = if correctly {
            question.answer().to_owned()
        } else {
            question
                .options()
                .iter()
                .find(|option| !question.is_correct_answer(option))
                .expect("incorrect option exists")
                .clone()
        };
        session.select_answer(answer);
        session.advance().expect("advance records a result");
    }

    #[test]
    fn session_starts_at_the_first_question() {
        let session = build_session(themed_bank(), 1);

        assert_eq!(session.total_questions(), 10);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(!session.is_finished());
        assert!(!session.can_proceed());
        assert!(session.current_question().is_some());
        assert!(session.current_theme_image().is_some());
        assert!(session.results().is_empty());
        assert_eq!(session.started_at(), fixed_now());
    }

    #[test]
    fn advance_without_selection_is_a_noop() {
        let mut session = build_session(themed_bank(), 2);
        let before = session.progress();

        assert!(session.advance().is_none());

        assert_eq!(session.progress(), before);
        assert_eq!(session.current_index(), 0);
        assert!(session.pending_answer().is_none());
    }

    #[test]
    fn blank_selection_clears_the_pending_answer() {
        let mut session = build_session(themed_bank(), 3);

        session.select_answer("  ");
        assert!(!session.can_proceed());

        session.select_answer("something");
        assert!(session.can_proceed());
        session.select_answer("");
        assert!(!session.can_proceed());
    }

    #[test]
    fn correct_answer_increments_the_score() {
        let mut session = build_session(themed_bank(), 4);

        answer_current(&mut session, true);

        assert_eq!(session.score(), 1);
        assert_eq!(session.results().len(), 1);
        assert!(session.results()[0].is_correct);
        assert_eq!(session.current_index(), 1);
        assert!(!session.can_proceed());
    }

    #[test]
    fn wrong_answer_records_without_scoring() {
        let mut session = build_session(themed_bank(), 5);

        answer_current(&mut session, false);

        assert_eq!(session.score(), 0);
        assert_eq!(session.results().len(), 1);
        assert!(!session.results()[0].is_correct);
    }

    #[test]
    fn finishing_keeps_the_position_on_the_last_question() {
        let mut session = build_session(themed_bank(), 6);

        for _ in 0..10 {
            answer_current(&mut session, true);
        }

        assert!(session.is_finished());
        assert_eq!(session.current_index(), 9);
        assert!(session.is_last_question());
        assert!(session.current_question().is_some());
        assert_eq!(session.score(), 10);
        assert_eq!(session.score_percentage(), 100);
        assert_eq!(session.score_category(), ScoreCategory::Perfect);
        assert_eq!(session.completed_at(), Some(fixed_now()));
    }

    #[test]
    fn finished_sessions_ignore_further_advances() {
        let mut session = build_session(themed_bank(), 7);
        for _ in 0..10 {
            answer_current(&mut session, true);
        }

        session.select_answer("anything");
        assert!(session.advance().is_none());
        assert_eq!(session.results().len(), 10);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn mixed_run_lands_in_the_matching_band() {
        let mut session = build_session(themed_bank(), 8);

        for round in 0..10 {
            answer_current(&mut session, round < 5);
        }

        assert_eq!(session.score(), 5);
        assert_eq!(session.score_percentage(), 50);
        assert_eq!(session.score_category(), ScoreCategory::Regular);
    }

    #[test]
    fn progress_tracks_the_run() {
        let mut session = build_session(themed_bank(), 9);
        answer_current(&mut session, true);
        answer_current(&mut session, false);

        let progress = session.progress();
        assert_eq!(progress.total, 10);
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.remaining, 8);
        assert_eq!(progress.correct, 1);
        assert!(!progress.is_finished);
    }

    #[test]
    fn restart_leaks_nothing_from_the_previous_attempt() {
        let mut session = build_session(themed_bank(), 10);
        for _ in 0..4 {
            answer_current(&mut session, true);
        }
        session.select_answer("dangling");

        session.restart_with_rng(&mut StdRng::seed_from_u64(99));

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.score(), 0);
        assert!(session.results().is_empty());
        assert!(session.pending_answer().is_none());
        assert!(!session.is_finished());
        assert!(session.completed_at().is_none());
        assert_eq!(session.total_questions(), 10);
    }

    #[test]
    fn results_partition_across_themes() {
        let mut session = build_session(themed_bank(), 11);
        while !session.is_finished() {
            answer_current(&mut session, true);
        }

        let grouped = session.results_by_theme();
        assert_eq!(grouped.len(), 5);
        for window in grouped.windows(2) {
            assert!(window[0].theme.id() < window[1].theme.id());
        }
        let total: usize = grouped.iter().map(|group| group.results.len()).sum();
        assert_eq!(total, 10);
        assert!(grouped.iter().all(|group| group.results.len() == 2));
    }

    #[test]
    fn flat_sessions_have_no_theme_view() {
        let mut session = build_session(flat_bank(), 12);
        answer_current(&mut session, true);

        assert!(session.current_theme_image().is_none());
        assert!(session.results_by_theme().is_empty());
    }

    #[test]
    fn summary_requires_a_finished_session() {
        let mut session = build_session(themed_bank(), 13);
        assert!(matches!(
            session.summary(),
            Err(SessionError::NotFinished)
        ));

        for round in 0..10 {
            answer_current(&mut session, round % 2 == 0);
        }

        let summary = session.summary().unwrap();
        assert_eq!(summary.total_questions(), 10);
        assert_eq!(summary.correct(), 5);
        assert_eq!(summary.started_at(), fixed_now());
        assert_eq!(summary.completed_at(), fixed_now());
    }
}
