use std::collections::BTreeMap;

use crate::error::Result;

use super::{ChartSlot, ChartSpec};

/// A charting library that can draw a [`ChartSpec`] and later release it.
pub trait ChartBackend {
    type Handle;

    fn create(&mut self, spec: &ChartSpec) -> Result<Self::Handle>;

    fn destroy(&mut self, slot: ChartSlot, handle: Self::Handle);
}

/// Live chart handles for one view, at most one per [`ChartSlot`].
///
/// Re-rendering a slot always destroys the previous handle first, and every
/// remaining handle is destroyed when the registry is dropped.
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    live: BTreeMap<ChartSlot, B::Handle>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: BTreeMap::new(),
        }
    }

    /// Replace the chart in `spec.slot`.
    ///
    /// If the backend fails to create the new chart the slot is left empty;
    /// the old handle has already been released.
    pub fn render(&mut self, spec: &ChartSpec) -> Result<()> {
        self.clear_slot(spec.slot);
        let handle = self.backend.create(spec)?;
        self.live.insert(spec.slot, handle);
        Ok(())
    }

    /// Render every spec, stopping at the first backend failure.
    pub fn render_all(&mut self, specs: &[ChartSpec]) -> Result<()> {
        for spec in specs {
            self.render(spec)?;
        }
        Ok(())
    }

    pub fn clear_slot(&mut self, slot: ChartSlot) {
        if let Some(handle) = self.live.remove(&slot) {
            tracing::trace!(%slot, "Destroying chart");
            self.backend.destroy(slot, handle);
        }
    }

    pub fn clear(&mut self) {
        let slots: Vec<ChartSlot> = self.live.keys().copied().collect();
        for slot in slots {
            self.clear_slot(slot);
        }
    }

    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.live.contains_key(&slot)
    }

    pub fn live_slots(&self) -> Vec<ChartSlot> {
        self.live.keys().copied().collect()
    }

    pub fn handle(&self, slot: ChartSlot) -> Option<&B::Handle> {
        self.live.get(&slot)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend> Drop for ChartRegistry<B> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::charts::{ChartKind, Dataset};
    use crate::error::CareCallError;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Create(ChartSlot, u32),
        Destroy(ChartSlot, u32),
    }

    #[derive(Clone, Default)]
    struct RecordingBackend {
        events: Arc<Mutex<Vec<Event>>>,
        next_id: u32,
        fail_on: Option<ChartSlot>,
    }

    impl RecordingBackend {
        fn live_count(&self) -> i32 {
            self.events
                .lock()
                .unwrap()
                .iter()
                .map(|e| match e {
                    Event::Create(..) => 1,
                    Event::Destroy(..) => -1,
                })
                .sum()
        }
    }

    impl ChartBackend for RecordingBackend {
        type Handle = u32;

        fn create(&mut self, spec: &ChartSpec) -> Result<u32> {
            if self.fail_on == Some(spec.slot) {
                return Err(CareCallError::Internal("canvas unavailable".into()));
            }
            self.next_id += 1;
            self.events
                .lock()
                .unwrap()
                .push(Event::Create(spec.slot, self.next_id));
            Ok(self.next_id)
        }

        fn destroy(&mut self, slot: ChartSlot, handle: u32) {
            self.events.lock().unwrap().push(Event::Destroy(slot, handle));
        }
    }

    fn spec(slot: ChartSlot) -> ChartSpec {
        ChartSpec {
            slot,
            kind: ChartKind::Line,
            title: slot.to_string(),
            labels: vec![],
            datasets: vec![Dataset {
                label: "x".into(),
                data: vec![],
            }],
            y_min: None,
            y_max: None,
        }
    }

    #[test]
    fn rerender_destroys_previous_handle_first() {
        let backend = RecordingBackend::default();
        let events = backend.events.clone();
        let mut registry = ChartRegistry::new(backend);

        registry.render(&spec(ChartSlot::MoodTrend)).unwrap();
        registry.render(&spec(ChartSlot::MoodTrend)).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Event::Create(ChartSlot::MoodTrend, 1),
                Event::Destroy(ChartSlot::MoodTrend, 1),
                Event::Create(ChartSlot::MoodTrend, 2),
            ]
        );
        assert_eq!(registry.handle(ChartSlot::MoodTrend), Some(&2));
    }

    #[test]
    fn at_most_one_live_handle_per_slot() {
        let mut registry = ChartRegistry::new(RecordingBackend::default());
        for _ in 0..5 {
            for slot in ChartSlot::ALL {
                registry.render(&spec(slot)).unwrap();
            }
        }
        assert_eq!(registry.live_slots().len(), ChartSlot::ALL.len());
        assert_eq!(registry.backend().live_count(), ChartSlot::ALL.len() as i32);
    }

    #[test]
    fn clear_releases_everything() {
        let mut registry = ChartRegistry::new(RecordingBackend::default());
        registry.render(&spec(ChartSlot::FoodIntake)).unwrap();
        registry.render(&spec(ChartSlot::SleepQuality)).unwrap();
        registry.clear();
        assert!(registry.live_slots().is_empty());
        assert_eq!(registry.backend().live_count(), 0);
    }

    #[test]
    fn drop_releases_remaining_handles() {
        let backend = RecordingBackend::default();
        let probe = backend.clone();
        {
            let mut registry = ChartRegistry::new(backend);
            registry.render(&spec(ChartSlot::PainTrend)).unwrap();
            registry.render(&spec(ChartSlot::RiskDistribution)).unwrap();
        }
        assert_eq!(probe.live_count(), 0);
    }

    #[test]
    fn failed_create_leaves_slot_empty() {
        let backend = RecordingBackend {
            fail_on: Some(ChartSlot::RiskDistribution),
            ..Default::default()
        };
        let mut registry = ChartRegistry::new(backend);
        registry.render(&spec(ChartSlot::MoodTrend)).unwrap();

        let specs = vec![spec(ChartSlot::PainTrend), spec(ChartSlot::RiskDistribution)];
        assert!(registry.render_all(&specs).is_err());
        assert!(registry.is_live(ChartSlot::PainTrend));
        assert!(!registry.is_live(ChartSlot::RiskDistribution));
        assert_eq!(registry.backend().live_count(), 2);
    }
}
