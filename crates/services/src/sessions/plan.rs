use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionBank, QuestionId, ThemeId};

/// Returns a shuffled copy of `items`, leaving the input untouched.
pub(crate) fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}

//
// ─── PLANNED QUESTION ──────────────────────────────────────────────────────────
//

/// Owning-theme context carried by a planned question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ThemeContext {
    pub id: ThemeId,
    pub image: String,
}

/// A question drawn into a session, with options in presentation order and
/// tagged with its owning theme when the bank is themed.
///
/// Computed once when the plan is built; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuestion {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    answer: String,
    theme: Option<ThemeContext>,
}

impl PlannedQuestion {
    fn new(question: &Question, options: Vec<String>, theme: Option<ThemeContext>) -> Self {
        Self {
            id: question.id(),
            prompt: question.prompt().to_owned(),
            options,
            answer: question.answer().to_owned(),
            theme,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Options in the order they should be presented.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn theme_id(&self) -> Option<ThemeId> {
        self.theme.as_ref().map(|theme| theme.id)
    }

    #[must_use]
    pub fn theme_image(&self) -> Option<&str> {
        self.theme.as_ref().map(|theme| theme.image.as_str())
    }

    /// Whether the submitted text matches the correct answer exactly.
    #[must_use]
    pub fn is_correct_answer(&self, submitted: &str) -> bool {
        self.answer == submitted
    }
}

//
// ─── SESSION PLAN ──────────────────────────────────────────────────────────────
//

/// The shuffled question sequence for one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    questions: Vec<PlannedQuestion>,
}

impl SessionPlan {
    #[must_use]
    pub fn questions(&self) -> &[PlannedQuestion] {
        &self.questions
    }

    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Builds a shuffled session plan from a question bank.
///
/// Themed banks get one well-defined shuffle stage: theme order, question
/// order within each theme, and option order within each question. Flat
/// banks shuffle option order, then the question sequence.
pub struct SessionBuilder<'a> {
    bank: &'a QuestionBank,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Build a plan using the thread-local RNG.
    #[must_use]
    pub fn build(self) -> SessionPlan {
        self.build_with_rng(&mut rng())
    }

    /// Build a plan drawing from the given RNG; tests pass a seeded one.
    #[must_use]
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> SessionPlan {
        let questions = match self.bank {
            QuestionBank::Themed(themes) => {
                let mut questions = Vec::with_capacity(self.bank.question_count());
                for theme in shuffled(themes, rng) {
                    let context = ThemeContext {
                        id: theme.id(),
                        image: theme.image().to_owned(),
                    };
                    for question in shuffled(theme.questions(), rng) {
                        let options = shuffled(question.options(), rng);
                        questions.push(PlannedQuestion::new(
                            &question,
                            options,
                            Some(context.clone()),
                        ));
                    }
                }
                questions
            }
            QuestionBank::Flat(bank_questions) => {
                let mut questions: Vec<PlannedQuestion> = bank_questions
                    .iter()
                    .map(|question| {
                        let options = shuffled(question.options(), rng);
                        PlannedQuestion::new(question, options, None)
                    })
                    .collect();
                questions.shuffle(rng);
                questions
            }
        };

        SessionPlan { questions }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
