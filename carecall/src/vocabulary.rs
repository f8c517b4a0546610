//! Categorical vocabulary shared by the analytics aggregator and the view builder.
//!
//! Every category-to-score and category-to-status mapping lives here so the
//! dashboard highlights and the charts can never disagree about what a mood
//! or a risk label means.

use serde::{Deserialize, Serialize};

/// Bucket label for a missing food intake or sleep quality value.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Ordinal score for an unmapped or missing mood.
pub const NEUTRAL_MOOD_SCORE: u8 = 3;

/// Mood → ordinal score (1 = worst, 5 = best).
pub const MOOD_SCORES: &[(&str, u8)] = &[
    ("cheerful", 5),
    ("happy", 5),
    ("good", 4),
    ("fine", 3),
    ("neutral", 3),
    ("tired", 2),
    ("worried", 2),
    ("sad", 1),
    ("anxious", 1),
];

/// Moods rendered with the `good` status.
const GOOD_MOODS: &[&str] = &["cheerful", "happy"];
/// Moods rendered with the `danger` status. Everything else is `warning`.
const DANGER_MOODS: &[&str] = &["sad", "anxious"];

const HIGH_ENTHUSIASM_MOODS: &[&str] = &["cheerful", "happy", "excited"];
const MEDIUM_ENTHUSIASM_MOODS: &[&str] = &["neutral", "calm"];

/// Trim and lower-case a categorical label. Empty labels count as missing.
pub fn normalize_label(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Ordinal mood score; unmapped or missing moods score as neutral.
pub fn mood_score(mood: Option<&str>) -> u8 {
    let Some(mood) = normalize_label(mood) else {
        return NEUTRAL_MOOD_SCORE;
    };
    MOOD_SCORES
        .iter()
        .find(|(label, _)| *label == mood)
        .map(|(_, score)| *score)
        .unwrap_or(NEUTRAL_MOOD_SCORE)
}

/// Three-level display status shared by every highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Danger,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// Mood → status. Anything outside the good and danger sets, including a
/// missing mood, is a warning.
pub fn mood_status(mood: Option<&str>) -> Status {
    match normalize_label(mood) {
        Some(m) if GOOD_MOODS.contains(&m.as_str()) => Status::Good,
        Some(m) if DANGER_MOODS.contains(&m.as_str()) => Status::Danger,
        _ => Status::Warning,
    }
}

/// Hospitalization risk label.
///
/// Absence of a prediction is LOW. Stored labels outside LOW/MEDIUM/HIGH
/// (the call pipeline writes `UNKNOWN` when no model is loaded) are kept
/// verbatim so they surface as their own bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Other(String),
}

impl RiskLevel {
    /// Resolve a stored label. Missing or blank labels fall back to LOW.
    pub fn from_label(raw: Option<&str>) -> Self {
        let Some(label) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Low;
        };
        match label.to_uppercase().as_str() {
            "LOW" => Self::Low,
            "MEDIUM" => Self::Medium,
            "HIGH" => Self::High,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Other(label) => label,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Low => Status::Good,
            Self::High => Status::Danger,
            Self::Medium | Self::Other(_) => Status::Warning,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engagement level inferred from a visit's mood, used to steer the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Enthusiasm {
    High,
    Medium,
    Low,
    Unknown,
}

pub fn enthusiasm_for_mood(mood: Option<&str>) -> Enthusiasm {
    match normalize_label(mood) {
        None => Enthusiasm::Unknown,
        Some(m) if HIGH_ENTHUSIASM_MOODS.contains(&m.as_str()) => Enthusiasm::High,
        Some(m) if MEDIUM_ENTHUSIASM_MOODS.contains(&m.as_str()) => Enthusiasm::Medium,
        Some(_) => Enthusiasm::Low,
    }
}
