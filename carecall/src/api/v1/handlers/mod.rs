pub mod dashboard;
pub(crate) mod health;
pub mod patients;
pub mod visits;

pub use health::health_check;
