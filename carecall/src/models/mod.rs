pub(crate) mod lenient;
mod patient;
mod stats;
mod visit;

pub use patient::*;
pub use stats::*;
pub use visit::*;
