pub mod difficulty;
pub mod engine_adapter;
pub mod history_service;
pub mod question_generator;
pub mod quiz_attempt_service;
pub mod quiz_service;
