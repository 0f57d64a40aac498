pub mod quiz_attempt_repository;

pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
