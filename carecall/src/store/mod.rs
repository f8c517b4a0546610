//! The visit record store call boundary.

mod envelope;
mod http;

pub use envelope::StoreEnvelope;
pub use http::HttpVisitStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DashboardStats, Patient, Visit};

/// Read endpoints of the patient and visit record store.
///
/// Implementations turn a `success: false` reply into
/// [`crate::error::CareCallError::Store`] carrying the store's message.
#[async_trait]
pub trait VisitStore: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats>;

    async fn list_patients(&self) -> Result<Vec<Patient>>;

    async fn get_patient(&self, patient_id: &str) -> Result<Patient>;

    /// Visits for one patient, newest first.
    async fn list_visits(&self, patient_id: &str) -> Result<Vec<Visit>>;

    async fn get_visit(&self, visit_id: &str) -> Result<Visit>;
}
