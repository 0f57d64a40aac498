use std::collections::HashSet;
use std::sync::Arc;

use mongodb::bson::DateTime;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{QuizAttempt, QuizAttemptDetail, NO_OPTION, UNKNOWN_LEVEL},
        dto::{
            request::{AnswerDetailInput, SubmitQuizRequest},
            response::{AttemptReviewDto, PurgeAttemptsResponse, SubmitQuizResponse},
        },
    },
    repositories::QuizAttemptRepository,
};

/// Records finished attempts and serves them back for review.
pub struct QuizAttemptService {
    repository: Arc<dyn QuizAttemptRepository>,
}

impl QuizAttemptService {
    pub fn new(repository: Arc<dyn QuizAttemptRepository>) -> Self {
        Self { repository }
    }

    pub async fn submit(&self, request: SubmitQuizRequest) -> AppResult<SubmitQuizResponse> {
        let attempt_id = self
            .record(
                request.profile_id,
                &request.subject,
                &request.topic,
                request.bloom_level,
                request.score,
                request.details,
            )
            .await?;

        Ok(SubmitQuizResponse::saved(attempt_id))
    }

    /// Persist one attempt and its details in a single write and return the new id.
    ///
    /// The score is stored as given.
    pub async fn record(
        &self,
        profile_id: i64,
        subject: &str,
        topic: &str,
        bloom_level: Option<String>,
        score: f64,
        details: Vec<AnswerDetailInput>,
    ) -> AppResult<String> {
        Self::validate_details(&details)?;

        let attempt = Self::create_attempt(profile_id, subject, topic, bloom_level, score, details);
        let saved = self.repository.create(attempt).await?;

        log::info!(
            "Recorded attempt {} for profile {} ({}/{}, {}): score {}, {} details",
            saved.id,
            saved.profile_id,
            saved.subject,
            saved.topic,
            saved.bloom_level,
            saved.score,
            saved.details.len()
        );

        Ok(saved.id)
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<AttemptReviewDto> {
        let attempt = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))?;

        Ok(AttemptReviewDto::from(attempt))
    }

    /// Remove every attempt of a learner, details included.
    pub async fn purge_profile(&self, profile_id: i64) -> AppResult<PurgeAttemptsResponse> {
        let deleted = self.repository.delete_by_profile(profile_id).await?;
        log::info!("Deleted {} attempts for profile {}", deleted, profile_id);

        Ok(PurgeAttemptsResponse {
            profile_id,
            deleted,
        })
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }

    /// Question indexes are 1-based and unique within an attempt.
    pub fn validate_details(details: &[AnswerDetailInput]) -> AppResult<()> {
        let mut seen = HashSet::with_capacity(details.len());

        for detail in details {
            if detail.question_index < 1 {
                return Err(AppError::ValidationError(format!(
                    "question_index must be 1 or greater, got {}",
                    detail.question_index
                )));
            }
            if !seen.insert(detail.question_index) {
                return Err(AppError::ValidationError(format!(
                    "Duplicate question_index {}",
                    detail.question_index
                )));
            }
        }

        Ok(())
    }

    pub fn create_attempt(
        profile_id: i64,
        subject: &str,
        topic: &str,
        bloom_level: Option<String>,
        score: f64,
        details: Vec<AnswerDetailInput>,
    ) -> QuizAttempt {
        let bloom_level = bloom_level
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| UNKNOWN_LEVEL.to_string());

        QuizAttempt {
            id: Uuid::now_v7().to_string(),
            profile_id,
            subject: subject.to_string(),
            topic: topic.to_string(),
            bloom_level,
            score,
            taken_at: DateTime::now(),
            details: details.into_iter().map(Self::create_detail).collect(),
        }
    }

    fn create_detail(input: AnswerDetailInput) -> QuizAttemptDetail {
        QuizAttemptDetail {
            id: Uuid::new_v4().to_string(),
            question_index: input.question_index,
            stem: input.stem,
            options: input.options.unwrap_or_default(),
            picked_idx: input.picked_idx.unwrap_or(NO_OPTION),
            correct_idx: input.correct_idx.unwrap_or(NO_OPTION),
            explanation: input.explanation.unwrap_or_default(),
        }
    }
}
