use std::fmt;

use serde::{Deserialize, Serialize};

/// Label stored when a submission does not say which level it was taken at.
pub const UNKNOWN_LEVEL: &str = "Unknown";

/// Bloom's taxonomy, lowest cognitive demand first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloomLevel::Remember => "Remember",
            BloomLevel::Understand => "Understand",
            BloomLevel::Apply => "Apply",
            BloomLevel::Analyze => "Analyze",
            BloomLevel::Evaluate => "Evaluate",
            BloomLevel::Create => "Create",
        }
    }

    /// The engine's numeric encoding, 1 = Remember through 6 = Create.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(BloomLevel::Remember),
            2 => Some(BloomLevel::Understand),
            3 => Some(BloomLevel::Apply),
            4 => Some(BloomLevel::Analyze),
            5 => Some(BloomLevel::Evaluate),
            6 => Some(BloomLevel::Create),
            _ => None,
        }
    }
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
