//! Translation between this service and the quiz generation engine.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{BloomLevel, HistorySummary},
        dto::{
            engine::{EngineQuestion, EngineRequest, EngineResponse},
            request::GradeInput,
            response::{GeneratedQuestion, GeneratedQuestionSet, QuestionSetMetadata},
        },
    },
};

static GRADE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("GRADE_DIGITS is a valid regex pattern"));

const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Integer grade from `4`, `"4"` or `"Grade 4"`. Only the first run of digits counts.
pub fn extract_grade(input: &GradeInput) -> AppResult<i64> {
    match input {
        GradeInput::Number(grade) => Ok(*grade),
        GradeInput::Text(text) => GRADE_DIGITS
            .find(text)
            .and_then(|digits| digits.as_str().parse().ok())
            .ok_or_else(|| AppError::ValidationError(format!("Invalid grade format: {}", input))),
    }
}

pub fn build_request(
    grade: &GradeInput,
    subject: &str,
    topic: &str,
    bloom_level: &str,
    history: HistorySummary,
) -> AppResult<EngineRequest> {
    Ok(EngineRequest {
        grade: extract_grade(grade)?,
        subject: subject.to_string(),
        topic: topic.to_string(),
        bloom_level: bloom_level.to_string(),
        history,
    })
}

/// Level name for whatever the engine sent. Unknown codes pass through as-is,
/// a missing level means Understand.
pub fn bloom_label(level: Option<&Value>) -> String {
    match level {
        None | Some(Value::Null) => BloomLevel::Understand.to_string(),
        Some(Value::String(text)) if text.is_empty() => BloomLevel::Understand.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(BloomLevel::from_code)
            .map(|level| level.to_string())
            .unwrap_or_else(|| number.to_string()),
        Some(other) => other.to_string(),
    }
}

/// 0-based option index for an answer letter. Anything unrecognised maps to 0.
pub fn answer_index(answer: Option<&str>) -> usize {
    let letter = answer.unwrap_or_default().trim().to_uppercase();
    OPTION_LETTERS
        .iter()
        .position(|candidate| *candidate == letter)
        .unwrap_or(0)
}

/// String fields arrive as arbitrary JSON; anything but a string counts as absent.
fn as_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    }
}

fn option_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn translate_question(position: usize, question: EngineQuestion, bloom: &str) -> GeneratedQuestion {
    let options = match question.options {
        Some(Value::Object(options)) => options,
        _ => Default::default(),
    };
    let ordered = OPTION_LETTERS
        .iter()
        .map(|letter| option_text(options.get(*letter)))
        .collect();

    GeneratedQuestion {
        id: format!("q{}", position),
        stem: as_text(question.question).unwrap_or_default().trim().to_string(),
        options: ordered,
        answer_idx: answer_index(question.answer.as_ref().and_then(Value::as_str)),
        bloom: bloom.to_string(),
        explanation: as_text(question.rationale).unwrap_or_default().trim().to_string(),
    }
}

/// Reshape an engine reply for the UI. Malformed pieces are defaulted, never rejected.
pub fn translate(response: EngineResponse) -> GeneratedQuestionSet {
    let metadata = response.metadata.unwrap_or_default();
    let bloom = bloom_label(metadata.bloom_level.as_ref());

    let questions = response
        .questions
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, question)| translate_question(i + 1, question, &bloom))
        .collect();

    GeneratedQuestionSet {
        metadata: QuestionSetMetadata {
            subject: as_text(metadata.subject),
            grade: metadata.grade,
            topic: as_text(metadata.topic),
            bloom_level: metadata.bloom_level,
            bloom,
        },
        questions,
    }
}
