use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_attempt::QuizAttemptSummary;

/// Aggregate of a learner's most recent attempts on one subject and topic.
///
/// `avg_score` and `last_bloom` are `None` when there are no attempts, which
/// is not the same thing as an average of `0.0`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct HistorySummary {
    pub attempts: usize,
    pub avg_score: Option<f64>,
    /// Level of the newest attempt. Carried to the engine, not used for selection.
    pub last_bloom: Option<String>,
}

impl HistorySummary {
    /// `recent` must be newest first.
    pub fn from_recent(recent: &[QuizAttemptSummary]) -> Self {
        let Some(newest) = recent.first() else {
            return Self::default();
        };

        let total: f64 = recent.iter().map(|a| a.score).sum();

        Self {
            attempts: recent.len(),
            avg_score: Some(total / recent.len() as f64),
            last_bloom: Some(newest.bloom_level.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attempts == 0
    }
}
