use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::domain::{HistorySummary, QuizAttempt, QuizAttemptDetail, QuizAttemptSummary};

pub const STATUS_SAVED: &str = "saved";

/// Engine output reshaped for the quiz UI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratedQuestionSet {
    pub metadata: QuestionSetMetadata,
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QuestionSetMetadata {
    pub subject: Option<String>,
    pub grade: Option<Value>,
    pub topic: Option<String>,
    /// The level exactly as the engine encoded it.
    pub bloom_level: Option<Value>,
    /// The level as a name.
    pub bloom: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedQuestion {
    pub id: String,
    pub stem: String,
    pub options: Vec<String>,
    pub answer_idx: usize,
    pub bloom: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmitQuizResponse {
    pub attempt_id: String,
    pub status: String,
}

impl SubmitQuizResponse {
    pub fn saved(attempt_id: String) -> Self {
        Self {
            attempt_id,
            status: STATUS_SAVED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttemptSummaryDto {
    pub id: String,
    pub subject: String,
    pub topic: String,
    pub bloom_level: String,
    pub score: f64,
    pub taken_at: DateTime<Utc>,
}

impl From<QuizAttemptSummary> for AttemptSummaryDto {
    fn from(attempt: QuizAttemptSummary) -> Self {
        AttemptSummaryDto {
            id: attempt.id,
            subject: attempt.subject,
            topic: attempt.topic,
            bloom_level: attempt.bloom_level,
            score: attempt.score,
            taken_at: to_utc(attempt.taken_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttemptDetailDto {
    pub question_index: i32,
    pub stem: String,
    pub options: Vec<String>,
    pub picked_idx: i32,
    pub correct_idx: i32,
    pub explanation: String,
}

impl From<QuizAttemptDetail> for AttemptDetailDto {
    fn from(detail: QuizAttemptDetail) -> Self {
        AttemptDetailDto {
            question_index: detail.question_index,
            stem: detail.stem,
            options: detail.options,
            picked_idx: detail.picked_idx,
            correct_idx: detail.correct_idx,
            explanation: detail.explanation,
        }
    }
}

/// A full attempt for review, details ordered by question index.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttemptReviewDto {
    pub id: String,
    pub profile_id: i64,
    pub subject: String,
    pub topic: String,
    pub bloom_level: String,
    pub score: f64,
    pub taken_at: DateTime<Utc>,
    pub details: Vec<AttemptDetailDto>,
}

impl From<QuizAttempt> for AttemptReviewDto {
    fn from(attempt: QuizAttempt) -> Self {
        let details = attempt
            .ordered_details()
            .into_iter()
            .map(AttemptDetailDto::from)
            .collect();

        AttemptReviewDto {
            id: attempt.id,
            profile_id: attempt.profile_id,
            subject: attempt.subject,
            topic: attempt.topic,
            bloom_level: attempt.bloom_level,
            score: attempt.score,
            taken_at: to_utc(attempt.taken_at),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HistoryResponse {
    pub history: HistorySummary,
    pub next_bloom_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PurgeAttemptsResponse {
    pub profile_id: i64,
    pub deleted: u64,
}

fn to_utc(taken_at: mongodb::bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(taken_at.timestamp_millis()).unwrap_or_default()
}
