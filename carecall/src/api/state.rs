use std::sync::Arc;

use crate::config::Config;
use crate::store::VisitStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Upstream patient and visit records.
    pub store: Arc<dyn VisitStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn VisitStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
