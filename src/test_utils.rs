use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{QuizAttempt, QuizAttemptSummary},
    repositories::QuizAttemptRepository,
};

/// Same ordering the Mongo repository asks the server for.
fn newest_first(a: &QuizAttemptSummary, b: &QuizAttemptSummary) -> Ordering {
    b.taken_at.cmp(&a.taken_at).then_with(|| b.id.cmp(&a.id))
}

pub struct InMemoryQuizAttemptRepository {
    attempts: Arc<RwLock<Vec<QuizAttempt>>>,
}

impl InMemoryQuizAttemptRepository {
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.attempts.read().await.len()
    }

    async fn summaries<F>(&self, keep: F, limit: i64) -> Vec<QuizAttemptSummary>
    where
        F: Fn(&QuizAttempt) -> bool,
    {
        let attempts = self.attempts.read().await;
        let mut items: Vec<_> = attempts.iter().filter(|a| keep(a)).map(QuizAttempt::summary).collect();
        items.sort_by(newest_first);
        items.truncate(limit.max(0) as usize);
        items
    }
}

#[async_trait]
impl QuizAttemptRepository for InMemoryQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        let mut attempts = self.attempts.write().await;
        if attempts.iter().any(|a| a.id == attempt.id) {
            return Err(AppError::AlreadyExists(format!(
                "Attempt with id '{}' already exists",
                attempt.id
            )));
        }
        attempts.push(attempt.clone());
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempts = self.attempts.read().await;
        Ok(attempts.iter().find(|a| a.id == id).cloned())
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
                |a| a.profile_id == profile_id && subject.map(|s| a.subject == s).unwrap_or(true),
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

/// Every call fails as if the store were down.
pub struct FailingQuizAttemptRepository;

impl FailingQuizAttemptRepository {
    fn down<T>() -> AppResult<T> {
        Err(AppError::DatabaseError("connection refused".to_string()))
    }
}

#[async_trait]
impl QuizAttemptRepository for FailingQuizAttemptRepository {
    async fn create(&self, _attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        Self::down()
    }

    async fn find_by_id(&self, _id: &str) -> AppResult<Option<QuizAttempt>> {
        Self::down()
    }

    async fn recent_for_topic(
        &self,
        _profile_id: i64,
        _subject: &str,
        _topic: &str,
        _limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        Self::down()
    }

    async fn recent_for_profile(
        &self,
        _profile_id: i64,
        _subject: Option<&str>,
        _limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        Self::down()
    }

    async fn delete_by_profile(&self, _profile_id: i64) -> AppResult<u64> {
        Self::down()
    }

    async fn health_check(&self) -> AppResult<()> {
        Self::down()
    }
}

pub mod fixtures {
    use mongodb::bson::DateTime;
    use uuid::Uuid;

    use crate::models::{domain::QuizAttempt, dto::request::AnswerDetailInput};

    /// An attempt taken at a fixed point in time, without details.
    pub fn attempt_at(
        profile_id: i64,
        subject: &str,
        topic: &str,
        score: f64,
        taken_at_millis: i64,
        bloom_level: &str,
    ) -> QuizAttempt {
        QuizAttempt {
            id: Uuid::now_v7().to_string(),
            profile_id,
            subject: subject.to_string(),
            topic: topic.to_string(),
            bloom_level: bloom_level.to_string(),
            score,
            taken_at: DateTime::from_millis(taken_at_millis),
            details: Vec::new(),
        }
    }

    pub fn answer_detail(question_index: i32, picked_idx: i32, correct_idx: i32) -> AnswerDetailInput {
        AnswerDetailInput {
            question_index,
            stem: format!("Question {}", question_index),
            options: Some(vec!["A".into(), "B".into(), "C".into(), "D".into()]),
            picked_idx: Some(picked_idx),
            correct_idx: Some(correct_idx),
            explanation: Some(format!("Because of rule {}", question_index)),
        }
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[tokio::test]
    async fn ties_on_timestamp_break_by_newer_id() {
        let repository = InMemoryQuizAttemptRepository::new();
        let older = attempt_at(1, "Math", "Sets", 0.1, 5_000, "Apply");
        let newer = attempt_at(1, "Math", "Sets", 0.9, 5_000, "Apply");
        repository.create(older.clone()).await.unwrap();
        repository.create(newer.clone()).await.unwrap();

        let recent = repository.recent_for_topic(1, "Math", "Sets", 5).await.unwrap();

        assert_eq!(recent[0].id, newer.id);
        assert_eq!(recent[1].id, older.id);
    }

    #[test]
    fn answer_detail_fixture_fills_every_field() {
        let detail = answer_detail(2, 1, 3);
        assert_eq!(detail.question_index, 2);
        assert_eq!(detail.options.as_ref().map(Vec::len), Some(4));
        assert_eq!(detail.correct_idx, Some(3));
    }
}
