pub mod bloom;
pub mod history;
pub mod quiz_attempt;

pub use bloom::{BloomLevel, UNKNOWN_LEVEL};
pub use history::HistorySummary;
pub use quiz_attempt::{QuizAttempt, QuizAttemptDetail, QuizAttemptSummary, NO_OPTION};
