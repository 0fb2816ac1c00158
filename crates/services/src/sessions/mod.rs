mod plan;
mod progress;
mod results;
mod service;

// Public API of the session subsystem.
pub use plan::{PlannedQuestion, SessionBuilder, SessionPlan};
pub use progress::SessionProgress;
pub use results::ThemeResult;
pub use service::QuizSession;
