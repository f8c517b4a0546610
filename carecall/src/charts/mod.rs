//! Chart-ready data derived from [`VisitAnalytics`].
//!
//! The actual drawing is done by whatever implements [`ChartBackend`]; this
//! module only decides what each chart slot shows and keeps the live handles
//! in a [`ChartRegistry`].

mod registry;
mod text;

pub use registry::{ChartBackend, ChartRegistry};
pub use text::TextBackend;

use serde::{Deserialize, Serialize};

use crate::analytics::{Distribution, VisitAnalytics};

/// One chart position on the patient dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum ChartSlot {
    MoodTrend,
    PainTrend,
    FoodIntake,
    SleepQuality,
    RiskDistribution,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 5] = [
        ChartSlot::MoodTrend,
        ChartSlot::PainTrend,
        ChartSlot::FoodIntake,
        ChartSlot::SleepQuality,
        ChartSlot::RiskDistribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MoodTrend => "moodTrend",
            Self::PainTrend => "painTrend",
            Self::FoodIntake => "foodIntake",
            Self::SleepQuality => "sleepQuality",
            Self::RiskDistribution => "riskDistribution",
        }
    }
}

impl std::fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Doughnut,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Fixed y-axis bounds for the trend charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_max: Option<f64>,
}

impl ChartSpec {
    fn trend(
        slot: ChartSlot,
        title: &str,
        labels: &[String],
        data: Vec<f64>,
        range: (f64, f64),
    ) -> Self {
        Self {
            slot,
            kind: ChartKind::Line,
            title: title.to_string(),
            labels: labels.to_vec(),
            datasets: vec![Dataset {
                label: title.to_string(),
                data,
            }],
            y_min: Some(range.0),
            y_max: Some(range.1),
        }
    }

    fn categorical(
        slot: ChartSlot,
        kind: ChartKind,
        title: &str,
        distribution: &Distribution,
    ) -> Self {
        Self {
            slot,
            kind,
            title: title.to_string(),
            labels: distribution.labels(),
            datasets: vec![Dataset {
                label: "Visits".to_string(),
                data: distribution.counts().into_iter().map(|c| c as f64).collect(),
            }],
            y_min: None,
            y_max: None,
        }
    }
}

/// One spec per [`ChartSlot`], in slot order.
pub fn build_chart_specs(analytics: &VisitAnalytics) -> Vec<ChartSpec> {
    let trend = &analytics.trend;
    ChartSlot::ALL
        .iter()
        .map(|slot| match slot {
            ChartSlot::MoodTrend => ChartSpec::trend(
                *slot,
                "Mood Score",
                &trend.labels,
                trend.mood_scores.iter().map(|s| f64::from(*s)).collect(),
                (1.0, 5.0),
            ),
            ChartSlot::PainTrend => ChartSpec::trend(
                *slot,
                "Pain Level",
                &trend.labels,
                trend.pain_levels.iter().map(|p| f64::from(*p)).collect(),
                (0.0, 10.0),
            ),
            ChartSlot::FoodIntake => ChartSpec::categorical(
                *slot,
                ChartKind::Doughnut,
                "Food Intake",
                &analytics.food_distribution,
            ),
            ChartSlot::SleepQuality => ChartSpec::categorical(
                *slot,
                ChartKind::Doughnut,
                "Sleep Quality",
                &analytics.sleep_distribution,
            ),
            ChartSlot::RiskDistribution => ChartSpec::categorical(
                *slot,
                ChartKind::Bar,
                "Hospitalization Risk",
                &analytics.risk_distribution,
            ),
        })
        .collect()
}
