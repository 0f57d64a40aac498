#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::RwLock;

use adaptive_quiz_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{QuizAttempt, QuizAttemptSummary},
        dto::engine::{EngineRequest, EngineResponse},
    },
    repositories::QuizAttemptRepository,
    services::question_generator::QuestionGenerator,
};

pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<Vec<QuizAttempt>>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn insert(&self, attempt: QuizAttempt) {
        self.attempts.write().await.push(attempt);
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    async fn summaries<F>(&self, keep: F, limit: i64) -> Vec<QuizAttemptSummary>
    where
        F: Fn(&QuizAttempt) -> bool,
    {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts
            .iter()
            .filter(|a| keep(a))
            .map(QuizAttempt::summary)
            .collect();
        items.sort_by(|a, b| b.taken_at.cmp(&a.taken_at).then_with(|| b.id.cmp(&a.id)));
        items.truncate(limit.max(0) as usize);
        items
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::AlreadyExists(attempt.id.clone()));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        Ok(self.attempts.read().await.iter().find(|a| a.id == id).cloned())
    }

    async fn recent_for_topic(
        &self,
        profile_id: i64,
        subject: &str,
        topic: &str,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        Ok(self
            .summaries(
                |a| a.profile_id == profile_id && a.subject == subject && a.topic == topic,
                limit,
            )
            .await)
    }

    async fn recent_for_profile(
        &self,
        profile_id: i64,
        subject: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        Ok(self
            .summaries(
                |a| a.profile_id == profile_id && subject.map_or(true, |s| a.subject == s),
                limit,
            )
            .await)
    }

    async fn delete_by_profile(&self, profile_id: i64) -> AppResult<u64> {
        let mut attempts = self.attempts.write().await;
        let before = attempts.len();
        attempts.retain(|a| a.profile_id != profile_id);
        Ok((before - attempts.len()) as u64)
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Engine double that records every request and replays a canned outcome.
pub struct RecordingGenerator {
    outcome: AppResult<EngineResponse>,
    requests: Mutex<Vec<EngineRequest>>,
}

impl RecordingGenerator {
    pub fn returning(response: EngineResponse) -> Self {
        Self {
            outcome: Ok(response),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(AppError::UpstreamError(message.to_string())),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<EngineRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl QuestionGenerator for RecordingGenerator {
    async fn generate(&self, request: &EngineRequest) -> AppResult<EngineResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "adaptive-learning-test".to_string(),
        attempts_collection: "quiz_attempts".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8000,
        quiz_engine_url: Some("http://localhost:9000".to_string()),
        quiz_api_key: None,
        quiz_engine_timeout_secs: 30,
        cors_allowed_origins: Vec::new(),
    }
}
