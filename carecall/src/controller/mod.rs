//! Sequences store fetches and owns what the dashboard shows.
//!
//! Every action takes a request token for the region it writes. A response is
//! applied only while its token is still the latest one for that region, so
//! overlapping clicks can never leave an older patient's data on screen.
//! The visits and profile modals share the screen, so opening either one
//! also invalidates a pending load of the other.
//! Failed fetches are logged and leave the state as it was.

mod state;
mod tokens;

pub use state::{DashboardState, Modal};
pub use tokens::{RequestTokens, Target};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use crate::analytics::dashboard_analytics;
use crate::charts::{build_chart_specs, ChartBackend, ChartRegistry, ChartSpec};
use crate::error::CareCallError;
use crate::store::VisitStore;
use crate::view::{PatientCard, PatientProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The response was the latest for its target and is now on screen.
    Applied,
    /// A newer request for the same target was issued; the response was dropped.
    Stale,
    /// The store could not be reached or reported failure.
    Failed,
}

pub struct DashboardController<B: ChartBackend> {
    store: Arc<dyn VisitStore>,
    state: RwLock<DashboardState>,
    charts: Mutex<ChartRegistry<B>>,
    tokens: RequestTokens,
    in_flight: AtomicUsize,
}

/// Keeps the loading indicator up for as long as it lives.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<B: ChartBackend> DashboardController<B> {
    pub fn new(store: Arc<dyn VisitStore>, backend: B) -> Self {
        Self {
            store,
            state: RwLock::new(DashboardState::default()),
            charts: Mutex::new(ChartRegistry::new(backend)),
            tokens: RequestTokens::default(),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Stats tiles and the patient list.
    pub async fn load_dashboard(&self) -> ActionOutcome {
        let token = self.tokens.issue(Target::Dashboard);
        let result = {
            let _loading = LoadingGuard::new(&self.in_flight);
            futures::future::try_join(self.store.dashboard_stats(), self.store.list_patients())
                .await
        };

        match result {
            Ok((stats, patients)) => self.apply(Target::Dashboard, token, |state| {
                tracing::info!(patients = patients.len(), "Dashboard loaded");
                state.stats = Some(stats);
                state.patients = patients.iter().map(PatientCard::from).collect();
            }),
            Err(e) => self.fail("load dashboard", e),
        }
    }

    /// Load a patient's visits, recompute analytics and redraw the charts.
    pub async fn view_visits(&self, patient_id: &str) -> ActionOutcome {
        let token = self.tokens.issue(Target::Visits);
        // Only one modal is shown; a pending profile load must not replace this one.
        self.tokens.issue(Target::Profile);
        let result = {
            let _loading = LoadingGuard::new(&self.in_flight);
            self.store.list_visits(patient_id).await
        };

        let visits = match result {
            Ok(visits) => visits,
            Err(e) => return self.fail("load visits", e),
        };

        self.apply(Target::Visits, token, |state| {
            let analytics = dashboard_analytics(&visits);
            self.redraw_charts(analytics.as_ref().map(build_chart_specs));

            tracing::info!(
                patient_id,
                visits = visits.len(),
                analytics = analytics.is_some(),
                "Visits loaded"
            );
            state.selected_patient = Some(patient_id.to_string());
            state.visits = visits;
            state.analytics = analytics;
            state.modal = Modal::Visits {
                patient_id: patient_id.to_string(),
            };
        })
    }

    pub async fn view_profile(&self, patient_id: &str) -> ActionOutcome {
        let token = self.tokens.issue(Target::Profile);
        self.tokens.issue(Target::Visits);
        let result = {
            let _loading = LoadingGuard::new(&self.in_flight);
            self.store.get_patient(patient_id).await
        };

        match result {
            Ok(patient) => self.apply(Target::Profile, token, |state| {
                state.profile = Some(PatientProfile::from(&patient));
                state.modal = Modal::Profile {
                    patient_id: patient_id.to_string(),
                };
            }),
            Err(e) => self.fail("load patient profile", e),
        }
    }

    /// Close whichever modal is open. Modal loads still in flight are
    /// invalidated so they cannot reopen it.
    pub fn close_modal(&self) {
        self.tokens.issue(Target::Visits);
        self.tokens.issue(Target::Profile);
        let mut state = self.write_state();
        self.lock_charts().clear();
        state.modal = Modal::Closed;
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn snapshot(&self) -> DashboardState {
        self.read_state().clone()
    }

    pub fn with_charts<R>(&self, f: impl FnOnce(&ChartRegistry<B>) -> R) -> R {
        f(&self.lock_charts())
    }

    fn apply(
        &self,
        target: Target,
        token: u64,
        update: impl FnOnce(&mut DashboardState),
    ) -> ActionOutcome {
        let mut state = self.write_state();
        if !self.tokens.is_current(target, token) {
            tracing::debug!(
                ?target,
                token,
                latest = self.tokens.latest(target),
                "Discarding stale response"
            );
            return ActionOutcome::Stale;
        }
        update(&mut state);
        ActionOutcome::Applied
    }

    fn fail(&self, action: &str, error: CareCallError) -> ActionOutcome {
        tracing::error!(error = %error, "Failed to {action}");
        ActionOutcome::Failed
    }

    /// Called with the state lock held. No specs empties every slot.
    fn redraw_charts(&self, specs: Option<Vec<ChartSpec>>) {
        let mut charts = self.lock_charts();
        match specs {
            Some(specs) => {
                if let Err(e) = charts.render_all(&specs) {
                    tracing::error!(error = %e, "Failed to render charts");
                }
            }
            None => charts.clear(),
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_charts(&self) -> MutexGuard<'_, ChartRegistry<B>> {
        self.charts.lock().unwrap_or_else(|e| e.into_inner())
    }
}
