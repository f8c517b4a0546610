//! Care-call dashboard: visit analytics, risk categorization and patient
//! views over the visit record store.

pub mod analytics;
pub mod api;
pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod store;
pub mod view;
pub mod vocabulary;

pub use error::{CareCallError, Result};
