use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{CareCallError, Result};

/// `{success, error, <payload key>: ...}` as returned by every store endpoint.
#[derive(Debug, Deserialize)]
pub struct StoreEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl StoreEnvelope {
    /// Take the payload under `key`, or fail with the store's own message.
    pub fn into_payload<T: DeserializeOwned>(mut self, key: &str) -> Result<T> {
        if !self.success {
            return Err(CareCallError::Store(
                self.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "Store reported failure".to_string()),
            ));
        }
        let value = self
            .payload
            .remove(key)
            .ok_or_else(|| CareCallError::Store(format!("Store response is missing `{key}`")))?;
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DashboardStats;
    use serde_json::json;

    fn envelope(value: Value) -> StoreEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_payload_on_success() {
        let stats: DashboardStats = envelope(json!({
            "success": true,
            "stats": {"totalPatients": 3, "totalVisits": 12}
        }))
        .into_payload("stats")
        .unwrap();
        assert_eq!(stats.total_patients, 3);
    }

    #[test]
    fn failure_short_circuits_with_store_message() {
        let err = envelope(json!({"success": false, "error": "Patient not found"}))
            .into_payload::<DashboardStats>("patient")
            .unwrap_err();
        assert!(matches!(err, CareCallError::Store(ref m) if m == "Patient not found"));
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_success_flag_is_failure() {
        let err = envelope(json!({"stats": {}}))
            .into_payload::<DashboardStats>("stats")
            .unwrap_err();
        assert!(matches!(err, CareCallError::Store(ref m) if m == "Store reported failure"));
    }

    #[test]
    fn missing_payload_key_is_an_error() {
        let err = envelope(json!({"success": true}))
            .into_payload::<DashboardStats>("stats")
            .unwrap_err();
        assert!(err.to_string().contains("missing `stats`"));
    }
}
