use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Sentinel for an unanswered question or an unknown correct option.
pub const NO_OPTION: i32 = -1;

/// One completed quiz, stored with its per-question detail embedded so the
/// summary and details are written by a single insert.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub profile_id: i64,
    pub subject: String,
    pub topic: String,
    pub bloom_level: String,
    pub score: f64,
    pub taken_at: DateTime,
    #[serde(default)]
    pub details: Vec<QuizAttemptDetail>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttemptDetail {
    pub id: String,
    /// 1-based, unique within the attempt.
    pub question_index: i32,
    pub stem: String,
    /// Positions in this list are what `picked_idx` and `correct_idx` refer to.
    pub options: Vec<String>,
    pub picked_idx: i32,
    pub correct_idx: i32,
    pub explanation: String,
}

/// An attempt read without its details.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct QuizAttemptSummary {
    pub id: String,
    pub profile_id: i64,
    pub subject: String,
    pub topic: String,
    pub bloom_level: String,
    pub score: f64,
    pub taken_at: DateTime,
}

impl QuizAttempt {
    pub fn summary(&self) -> QuizAttemptSummary {
        QuizAttemptSummary {
            id: self.id.clone(),
            profile_id: self.profile_id,
            subject: self.subject.clone(),
            topic: self.topic.clone(),
            bloom_level: self.bloom_level.clone(),
            score: self.score,
            taken_at: self.taken_at,
        }
    }

    /// Details ordered by question index, whatever order they were stored in.
    pub fn ordered_details(&self) -> Vec<QuizAttemptDetail> {
        let mut details = self.details.clone();
        details.sort_by_key(|d| d.question_index);
        details
    }
}
