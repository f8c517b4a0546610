use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use super::{StoreEnvelope, VisitStore};
use crate::config::StoreConfig;
use crate::error::{CareCallError, Result};
use crate::models::{DashboardStats, Patient, Visit};

/// [`VisitStore`] over the store's `/api/...` JSON endpoints.
#[derive(Clone)]
pub struct HttpVisitStore {
    client: Client,
    base_url: Url,
}

impl HttpVisitStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(CareCallError::Config(format!(
                "Store URL cannot be a base: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CareCallError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CareCallError::Config(format!("Invalid store URL: {}", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, segments: &[&str], key: &str) -> Result<T> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "Fetching from store");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<StoreEnvelope>(&body) {
            Ok(envelope) => envelope.into_payload(key),
            Err(_) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(CareCallError::NotFound(format!("{url} not found")))
            }
            Err(_) if !status.is_success() => Err(CareCallError::Store(format!(
                "Store returned {status} for {url}"
            ))),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl VisitStore for HttpVisitStore {
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.fetch(&["dashboard", "stats"], "stats").await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        self.fetch(&["patients"], "patients").await
    }

    async fn get_patient(&self, patient_id: &str) -> Result<Patient> {
        self.fetch(&["patients", patient_id], "patient").await
    }

    async fn list_visits(&self, patient_id: &str) -> Result<Vec<Visit>> {
        self.fetch(&["patients", patient_id, "visits"], "visits").await
    }

    async fn get_visit(&self, visit_id: &str) -> Result<Visit> {
        self.fetch(&["visits", visit_id], "visit").await
    }
}
