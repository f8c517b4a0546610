//! Visit analytics for a single patient.
//!
//! [`VisitAnalytics::compute`] is pure: it borrows the visits, never mutates
//! them, and returns the same summary for the same input. Every missing
//! field resolves through a fixed default:
//!
//! | Field | Default |
//! |---|---|
//! | `painReport` | 0 (still counted in the denominator) |
//! | `mood` | ordinal 3 |
//! | `medicationsTaken` | not taken |
//! | `foodIntake`, `sleepQuality` | `"unknown"` bucket |
//! | hospitalization prediction | `"LOW"` bucket |

mod distribution;
mod trend;

pub use distribution::Distribution;
pub use trend::{chronological, TrendSeries, UNDATED_LABEL};

use serde::{Deserialize, Serialize};

use crate::models::Visit;
use crate::vocabulary::{mood_score, RiskLevel, UNKNOWN_CATEGORY};

/// The dashboard only shows analytics once a patient has this many visits.
pub const MIN_VISITS_FOR_ANALYTICS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisitAnalytics {
    pub visit_count: usize,
    /// Mean pain over every visit, in `[0, 10]`.
    pub avg_pain: f64,
    /// Percentage of visits with medication taken, one decimal (`"50.0"`).
    pub medication_adherence: String,
    /// Mean ordinal mood, in `[1, 5]`.
    pub avg_mood: f64,
    #[schema(value_type = Object)]
    pub food_distribution: Distribution,
    #[schema(value_type = Object)]
    pub sleep_distribution: Distribution,
    pub most_common_food: String,
    pub most_common_sleep: String,
    #[schema(value_type = Object)]
    pub risk_distribution: Distribution,
    /// Percentage of HIGH-risk visits, one decimal.
    pub high_risk_percentage: String,
    pub memory_issue_count: usize,
    pub follow_up_count: usize,
    /// Risk label of the most recent visit.
    pub latest_risk_level: String,
    pub trend: TrendSeries,
}

impl VisitAnalytics {
    /// Summarize a patient's visits. `None` only when there are no visits.
    pub fn compute(visits: &[Visit]) -> Option<Self> {
        if visits.is_empty() {
            return None;
        }

        let ordered = chronological(visits);
        let total = ordered.len();

        let mut pain_sum = 0u32;
        let mut mood_sum = 0u32;
        let mut medications_taken = 0usize;
        let mut high_risk = 0usize;
        let mut memory_issue_count = 0usize;
        let mut follow_up_count = 0usize;
        let mut food_distribution = Distribution::new();
        let mut sleep_distribution = Distribution::new();
        let mut risk_distribution = Distribution::new();

        for visit in &ordered {
            pain_sum += u32::from(visit.pain_level());
            mood_sum += u32::from(mood_score(visit.mood()));
            if visit.medications_taken() {
                medications_taken += 1;
            }
            if visit.memory_issues_noted() {
                memory_issue_count += 1;
            }
            if visit.needs_follow_up() {
                follow_up_count += 1;
            }

            food_distribution.increment(visit.food_intake_label());
            sleep_distribution.increment(visit.sleep_quality_label());

            let risk = visit.risk_level();
            if risk == RiskLevel::High {
                high_risk += 1;
            }
            risk_distribution.increment(risk.as_str());
        }

        let latest_risk_level = ordered
            .last()
            .map(|v| v.risk_level().as_str().to_string())
            .unwrap_or_else(|| RiskLevel::Low.as_str().to_string());

        Some(Self {
            visit_count: total,
            avg_pain: f64::from(pain_sum) / total as f64,
            medication_adherence: percentage(medications_taken, total),
            avg_mood: f64::from(mood_sum) / total as f64,
            most_common_food: most_common(&food_distribution),
            most_common_sleep: most_common(&sleep_distribution),
            food_distribution,
            sleep_distribution,
            risk_distribution,
            high_risk_percentage: percentage(high_risk, total),
            memory_issue_count,
            follow_up_count,
            latest_risk_level,
            trend: TrendSeries::from_ordered(&ordered),
        })
    }
}

/// Analytics as shown on the dashboard: skipped entirely below
/// [`MIN_VISITS_FOR_ANALYTICS`] visits.
pub fn dashboard_analytics(visits: &[Visit]) -> Option<VisitAnalytics> {
    if visits.len() < MIN_VISITS_FOR_ANALYTICS {
        tracing::debug!(
            visits = visits.len(),
            "Skipping analytics, not enough visits"
        );
        return None;
    }
    VisitAnalytics::compute(visits)
}

fn most_common(distribution: &Distribution) -> String {
    distribution
        .mode()
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_string()
}

/// `100 * matching / total` with one decimal, rounding half away from zero.
/// A zero total reads as `"0.0"`.
pub fn percentage(matching: usize, total: usize) -> String {
    if total == 0 {
        return "0.0".to_string();
    }
    let pct = matching as f64 * 100.0 / total as f64;
    format!("{:.1}", (pct * 10.0).round() / 10.0)
}
