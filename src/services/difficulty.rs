use crate::models::domain::{BloomLevel, HistorySummary};

pub const ANALYZE_THRESHOLD: f64 = 0.8;
pub const APPLY_THRESHOLD: f64 = 0.6;

/// Pick the Bloom level for the next quiz.
///
/// A non-empty `requested` level always wins. Without history the learner
/// starts at Understand rather than the bottom of the scale. Otherwise the
/// average of the recent window decides; each threshold belongs to the higher
/// bucket. `last_bloom` is not consulted.
pub fn select_level(history: &HistorySummary, requested: Option<&str>) -> String {
    if let Some(level) = requested.filter(|level| !level.is_empty()) {
        return level.to_string();
    }

    if history.is_empty() {
        return BloomLevel::Understand.to_string();
    }

    let avg = history.avg_score.unwrap_or(0.0);
    let level = if avg >= ANALYZE_THRESHOLD {
        BloomLevel::Analyze
    } else if avg >= APPLY_THRESHOLD {
        BloomLevel::Apply
    } else {
        BloomLevel::Remember
    };

    level.to_string()
}
