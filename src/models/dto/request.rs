use serde::{Deserialize, Serialize};
use validator::Validate;

pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 200;

/// Grades arrive as `4`, `"4"` or `"Grade 4"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GradeInput {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for GradeInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeInput::Number(n) => write!(f, "{}", n),
            GradeInput::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GenerateQuizRequest {
    pub profile_id: i64,
    pub grade: GradeInput,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    /// Pins the level. Absent or empty lets the history decide.
    #[serde(default)]
    pub bloom_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswerDetailInput {
    pub question_index: i32,
    pub stem: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub picked_idx: Option<i32>,
    #[serde(default)]
    pub correct_idx: Option<i32>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SubmitQuizRequest {
    pub profile_id: i64,

    #[validate(length(max = 200))]
    pub subject: String,

    #[validate(length(max = 200))]
    pub topic: String,

    #[serde(default)]
    pub bloom_level: Option<String>,

    pub score: f64,

    #[serde(default)]
    #[validate(length(max = 100))]
    pub details: Vec<AnswerDetailInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecentAttemptsQuery {
    pub profile_id: i64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl RecentAttemptsQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }

    /// An empty subject filter means no filter.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryQuery {
    pub profile_id: i64,
    pub subject: String,
    pub topic: String,
    #[serde(default)]
    pub bloom_level: Option<String>,
}
