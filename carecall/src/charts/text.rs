use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::error::{CareCallError, Result};

use super::{ChartBackend, ChartSlot, ChartSpec};

const DEFAULT_WIDTH: usize = 40;

/// Renders charts as horizontal bars for terminal output. Bars span the
/// chart's y-range when it has one, else zero to the largest value.
#[derive(Debug)]
pub struct TextBackend {
    width: usize,
    next_id: u64,
    canvases: BTreeMap<u64, String>,
}

impl Default for TextBackend {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl TextBackend {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            next_id: 0,
            canvases: BTreeMap::new(),
        }
    }

    pub fn output(&self, handle: u64) -> Option<&str> {
        self.canvases.get(&handle).map(String::as_str)
    }

    /// Number of charts created and not yet destroyed.
    pub fn live(&self) -> usize {
        self.canvases.len()
    }

    fn draw(&self, spec: &ChartSpec) -> std::result::Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", spec.title)?;

        let Some(dataset) = spec.datasets.first() else {
            return Ok(out);
        };
        let min = spec.y_min.unwrap_or(0.0);
        let max = spec
            .y_max
            .unwrap_or_else(|| dataset.data.iter().copied().fold(0.0, f64::max));
        let span = max - min;
        let label_width = spec.labels.iter().map(String::len).max().unwrap_or(0);

        for (label, value) in spec.labels.iter().zip(&dataset.data) {
            let filled = if span > 0.0 {
                (((value - min) / span).clamp(0.0, 1.0) * self.width as f64).round() as usize
            } else {
                0
            };
            writeln!(
                out,
                "  {label:>label_width$} | {} {value}",
                "#".repeat(filled.min(self.width))
            )?;
        }
        Ok(out)
    }
}

impl ChartBackend for TextBackend {
    type Handle = u64;

    fn create(&mut self, spec: &ChartSpec) -> Result<u64> {
        let canvas = self
            .draw(spec)
            .map_err(|e| CareCallError::Internal(format!("Failed to draw {}: {e}", spec.slot)))?;
        self.next_id += 1;
        self.canvases.insert(self.next_id, canvas);
        Ok(self.next_id)
    }

    fn destroy(&mut self, _slot: ChartSlot, handle: u64) {
        self.canvases.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, ChartRegistry, Dataset};

    fn spec(slot: ChartSlot, labels: &[&str], data: &[f64], y_max: Option<f64>) -> ChartSpec {
        ChartSpec {
            slot,
            kind: ChartKind::Bar,
            title: "Food Intake".into(),
            labels: labels.iter().map(|s| s.to_string()).collect(),
            datasets: vec![Dataset {
                label: "Visits".into(),
                data: data.to_vec(),
            }],
            y_min: None,
            y_max,
        }
    }

    #[test]
    fn bars_scale_to_largest_value() {
        let mut backend = TextBackend::new(10);
        let handle = backend
            .create(&spec(ChartSlot::FoodIntake, &["normal", "low"], &[2.0, 1.0], None))
            .unwrap();
        let out = backend.output(handle).unwrap();
        assert!(out.starts_with("Food Intake\n"));
        assert!(out.contains("normal | ########## 2"));
        assert!(out.contains("   low | ##### 1"));
    }

    #[test]
    fn fixed_axis_caps_bar_length() {
        let mut backend = TextBackend::new(10);
        let handle = backend
            .create(&spec(ChartSlot::PainTrend, &["d1"], &[5.0], Some(10.0)))
            .unwrap();
        assert!(backend.output(handle).unwrap().contains("d1 | ##### 5"));
    }

    #[test]
    fn bars_start_at_the_axis_minimum() {
        let mut backend = TextBackend::new(8);
        let mut mood = spec(
            ChartSlot::MoodTrend,
            &["d1", "d2", "d3"],
            &[1.0, 3.0, 5.0],
            Some(5.0),
        );
        mood.y_min = Some(1.0);
        let handle = backend.create(&mood).unwrap();
        let out = backend.output(handle).unwrap();
        assert!(out.contains("d1 |  1"), "{out}");
        assert!(out.contains("d2 | #### 3"), "{out}");
        assert!(out.contains("d3 | ######## 5"), "{out}");
    }

    #[test]
    fn registry_keeps_one_canvas_per_slot() {
        let mut registry = ChartRegistry::new(TextBackend::default());
        let s = spec(ChartSlot::FoodIntake, &["low"], &[1.0], None);
        registry.render(&s).unwrap();
        registry.render(&s).unwrap();
        assert_eq!(registry.backend().live(), 1);
        registry.clear();
        assert_eq!(registry.backend().live(), 0);
    }
}
