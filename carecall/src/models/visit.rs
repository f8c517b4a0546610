use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::vocabulary::{normalize_label, RiskLevel, UNKNOWN_CATEGORY};

/// One recorded care call. Visits are append-only; nothing here mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    #[serde(
        rename = "_id",
        alias = "id",
        default,
        deserialize_with = "lenient::string_or_empty"
    )]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub patient_id: String,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub caregiver: Option<String>,
    /// ISO-8601 as written by the store; see [`parse_timestamp`].
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub summary: Option<VisitSummary>,
    #[serde(
        rename = "openaiAnalysis",
        alias = "analysis",
        default,
        deserialize_with = "lenient::opt_record",
        skip_serializing_if = "Option::is_none"
    )]
    pub analysis: Option<VisitAnalysis>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub hospitalization_prediction: Option<HospitalizationPrediction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitSummary {
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub medications_taken: Option<bool>,
    /// 0 (no pain) to 10 (severe).
    #[serde(default, deserialize_with = "lenient::opt_pain", skip_serializing_if = "Option::is_none")]
    pub pain_report: Option<u8>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub food_intake: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub memory_issues_noted: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub able_to_leave_house: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub small_talk_topic: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub markers: Option<VisitMarkers>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitMarkers {
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub needs_follow_up: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_bool", skip_serializing_if = "Option::is_none")]
    pub appointment_missed: Option<bool>,
}

/// Structured output of the transcript analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitAnalysis {
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub conversation_context: Option<ConversationContext>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub key_insights: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub risk_factors: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_record", skip_serializing_if = "Option::is_none")]
    pub hospitalization_prediction: Option<HospitalizationPrediction>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub enthusiasm_level: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub topic_interest: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub conversation_flow: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub follow_up_topics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalizationPrediction {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    /// Model confidence in `[0, 1]`.
    #[serde(default, deserialize_with = "lenient::opt_unit_interval", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Raw classifier output: 1 = admission predicted.
    #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
    pub prediction: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub prediction_timestamp: Option<String>,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a stored timestamp. RFC 3339 values are normalized to UTC; naive
/// values (Python `isoformat()` output) are taken as UTC already.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl Visit {
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn mood(&self) -> Option<&str> {
        self.summary.as_ref()?.mood.as_deref()
    }

    /// Reported pain; a missing report counts as zero pain.
    pub fn pain_level(&self) -> u8 {
        self.summary
            .as_ref()
            .and_then(|s| s.pain_report)
            .unwrap_or(0)
    }

    pub fn medications_taken(&self) -> bool {
        self.summary
            .as_ref()
            .and_then(|s| s.medications_taken)
            .unwrap_or(false)
    }

    pub fn memory_issues_noted(&self) -> bool {
        self.summary
            .as_ref()
            .and_then(|s| s.memory_issues_noted)
            .unwrap_or(false)
    }

    pub fn needs_follow_up(&self) -> bool {
        self.summary
            .as_ref()
            .and_then(|s| s.markers.as_ref())
            .and_then(|m| m.needs_follow_up)
            .unwrap_or(false)
    }

    pub fn small_talk_topic(&self) -> Option<&str> {
        self.summary.as_ref()?.small_talk_topic.as_deref()
    }

    /// Food intake bucket label; missing values land in "unknown".
    pub fn food_intake_label(&self) -> String {
        normalize_label(self.summary.as_ref().and_then(|s| s.food_intake.as_deref()))
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }

    /// Sleep quality bucket label; missing values land in "unknown".
    pub fn sleep_quality_label(&self) -> String {
        normalize_label(self.summary.as_ref().and_then(|s| s.sleep_quality.as_deref()))
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }

    /// The prediction nested in the analysis, else the one stored beside it.
    pub fn prediction(&self) -> Option<&HospitalizationPrediction> {
        self.analysis
            .as_ref()
            .and_then(|a| a.hospitalization_prediction.as_ref())
            .or(self.hospitalization_prediction.as_ref())
    }

    /// Risk label; a visit with no prediction is LOW.
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_label(self.prediction().and_then(|p| p.risk_level.as_deref()))
    }

    pub fn risk_confidence(&self) -> Option<f64> {
        self.prediction().and_then(|p| p.confidence)
    }
}
