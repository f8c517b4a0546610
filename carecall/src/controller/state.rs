use crate::analytics::VisitAnalytics;
use crate::models::{DashboardStats, Visit};
use crate::view::{PatientCard, PatientProfile};

/// Which dialog is open on top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Modal {
    #[default]
    Closed,
    Visits { patient_id: String },
    Profile { patient_id: String },
}

/// Everything the dashboard currently shows.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub stats: Option<DashboardStats>,
    pub patients: Vec<PatientCard>,
    pub selected_patient: Option<String>,
    /// Visits of the selected patient, newest first as the store returns them.
    pub visits: Vec<Visit>,
    /// `None` until the selected patient has enough visits.
    pub analytics: Option<VisitAnalytics>,
    pub profile: Option<PatientProfile>,
    pub modal: Modal,
}

impl DashboardState {
    /// Display name of the selected patient, if it is in the loaded list.
    pub fn selected_name(&self) -> Option<&str> {
        let id = self.selected_patient.as_deref()?;
        self.patients
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.as_str())
    }
}
