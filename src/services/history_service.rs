use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::{
        domain::HistorySummary,
        dto::{
            request::{HistoryQuery, RecentAttemptsQuery},
            response::{AttemptSummaryDto, HistoryResponse},
        },
    },
    repositories::QuizAttemptRepository,
    services::difficulty::select_level,
};

/// How many of the newest attempts feed the adaptive decision.
pub const HISTORY_WINDOW: i64 = 5;

/// Read-only view over past attempts.
pub struct HistoryService {
    repository: Arc<dyn QuizAttemptRepository>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn QuizAttemptRepository>) -> Self {
        Self { repository }
    }

    /// Summarize the newest attempts matching profile, subject and topic exactly.
    pub async fn summarize(
        &self,
        profile_id: i64,
        subject: &str,
        topic: &str,
    ) -> AppResult<HistorySummary> {
        let recent = self
            .repository
            .recent_for_topic(profile_id, subject, topic, HISTORY_WINDOW)
            .await?;

        let summary = HistorySummary::from_recent(&recent);
        log::debug!(
            "History for profile {} ({}/{}): {} attempts, avg {:?}",
            profile_id,
            subject,
            topic,
            summary.attempts,
            summary.avg_score
        );
        Ok(summary)
    }

    pub async fn recent(&self, query: &RecentAttemptsQuery) -> AppResult<Vec<AttemptSummaryDto>> {
        let attempts = self
            .repository
            .recent_for_profile(query.profile_id, query.subject(), query.limit())
            .await?;

        Ok(attempts.into_iter().map(AttemptSummaryDto::from).collect())
    }

    /// The level `generate` would target right now, without calling the engine.
    pub async fn preview(&self, query: &HistoryQuery) -> AppResult<HistoryResponse> {
        let history = self
            .summarize(query.profile_id, &query.subject, &query.topic)
            .await?;
        let next_bloom_level = select_level(&history, query.bloom_level.as_deref());

        Ok(HistoryResponse {
            history,
            next_bloom_level,
        })
    }
}
