use serde::{Deserialize, Serialize};

use crate::models::Visit;
use crate::vocabulary::mood_score;

/// Label used on the time axis for a visit without a usable timestamp.
pub const UNDATED_LABEL: &str = "unknown";

/// Visits in ascending timestamp order.
///
/// The sort is stable, so visits sharing a timestamp keep their relative
/// input order. Visits without a parseable timestamp sort first.
pub fn chronological(visits: &[Visit]) -> Vec<&Visit> {
    let mut ordered: Vec<&Visit> = visits.iter().collect();
    ordered.sort_by_key(|visit| visit.recorded_at());
    ordered
}

/// Per-visit series for the trend charts, aligned index by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    /// `YYYY-MM-DD` per visit.
    pub labels: Vec<String>,
    pub mood_scores: Vec<u8>,
    pub pain_levels: Vec<u8>,
    pub risk_confidence: Vec<Option<f64>>,
}

impl TrendSeries {
    /// Build from visits already in chronological order.
    pub fn from_ordered(visits: &[&Visit]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(visits.len()),
            mood_scores: Vec::with_capacity(visits.len()),
            pain_levels: Vec::with_capacity(visits.len()),
            risk_confidence: Vec::with_capacity(visits.len()),
        };
        for visit in visits {
            series.labels.push(
                visit
                    .recorded_at()
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| UNDATED_LABEL.to_string()),
            );
            series.mood_scores.push(mood_score(visit.mood()));
            series.pain_levels.push(visit.pain_level());
            series.risk_confidence.push(visit.risk_confidence());
        }
        series
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
