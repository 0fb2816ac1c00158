mod bank;
mod ids;
mod question;
mod result;
mod score;
mod summary;
mod theme;

pub use ids::{ParseIdError, QuestionId, ThemeId};

pub use bank::{
    BankDraft, BankError, QUESTIONS_PER_FLAT_BANK, QuestionBank, THEMES_PER_BANK,
};
pub use question::{OPTIONS_PER_QUESTION, Question, QuestionDraft, QuestionError};
pub use result::QuestionResult;
pub use score::{ScoreCategory, score_percentage};
pub use summary::{QuizSummary, QuizSummaryError};
pub use theme::{QUESTIONS_PER_THEME, Theme, ThemeDraft, ThemeError};
