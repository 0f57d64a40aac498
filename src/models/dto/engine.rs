//! Wire types for the external quiz generation engine.

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::domain::HistorySummary;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EngineRequest {
    pub grade: i64,
    pub subject: String,
    pub topic: String,
    pub bloom_level: String,
    pub history: HistorySummary,
}

/// Engine output is model generated, so every field is optional and loosely typed.
/// A section or question of the wrong shape reads as empty instead of failing the reply.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineResponse {
    #[serde(default, deserialize_with = "default_on_error")]
    pub metadata: Option<EngineMetadata>,
    #[serde(default, deserialize_with = "lenient_questions")]
    pub questions: Option<Vec<EngineQuestion>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineMetadata {
    #[serde(default)]
    pub subject: Option<Value>,
    #[serde(default)]
    pub grade: Option<Value>,
    #[serde(default)]
    pub topic: Option<Value>,
    /// Either a 1-6 code or a level name.
    #[serde(default)]
    pub bloom_level: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineQuestion {
    #[serde(default)]
    pub question: Option<Value>,
    /// Expected to be keyed by letter, `A` through `D`.
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub rationale: Option<Value>,
}

fn default_on_error<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_questions<'de, D>(deserializer: D) -> Result<Option<Vec<EngineQuestion>>, D::Error>
where
    D: Deserializer<'de>,
{
    let questions = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => return Ok(None),
    };
    Ok(Some(questions))
}
