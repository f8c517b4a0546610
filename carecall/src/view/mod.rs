//! Display fragments for patients and visits.
//!
//! Statuses come from [`crate::vocabulary`] so a highlight never disagrees
//! with the analytics about what a mood or a risk label means.

mod patient;
mod visit;

pub use patient::{format_medication, ConditionView, PatientCard, PatientProfile};
pub use visit::{Highlight, LastVisitContext, VisitDetail, VisitHighlights, NO_TOPIC};
