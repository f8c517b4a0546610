use serde::{Deserialize, Serialize};

use super::lenient;

/// Headline counts for the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_patients: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub total_visits: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub recent_visits: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub needs_follow_up: u64,
    #[serde(default, deserialize_with = "lenient::u64_or_zero")]
    pub high_risk_patients: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_counts_default_to_zero() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalPatients": 4,
            "totalVisits": 19,
            "recentVisits": null
        }))
        .unwrap();
        assert_eq!(stats.total_patients, 4);
        assert_eq!(stats.total_visits, 19);
        assert_eq!(stats.recent_visits, 0);
        assert_eq!(stats.high_risk_patients, 0);
    }
}
