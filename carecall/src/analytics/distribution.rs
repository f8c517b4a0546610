use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Category → count, kept in first-seen order.
///
/// Serializes as a JSON object whose key order is the insertion order, so a
/// chart built from it lists categories in the order they first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Distribution {
    buckets: Vec<(String, usize)>,
}

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distribution = Self::new();
        for label in labels {
            distribution.increment(label);
        }
        distribution
    }

    pub fn increment(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self.buckets.iter_mut().find(|(l, _)| *l == label) {
            Some((_, count)) => *count += 1,
            None => self.buckets.push((label, 1)),
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.buckets
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.buckets.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|(_, c)| *c).collect()
    }

    /// The most frequent category. Ties go to the category seen first.
    pub fn mode(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (label, count) in self.iter() {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (label, count) in &self.buckets {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Distribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = Distribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category label to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Distribution, A::Error> {
                let mut buckets = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, count)) = access.next_entry::<String, usize>()? {
                    buckets.push((label, count));
                }
                Ok(Distribution { buckets })
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let d = Distribution::from_labels(["low", "normal", "low", "none"]);
        assert_eq!(d.labels(), vec!["low", "normal", "none"]);
        assert_eq!(d.counts(), vec![2, 1, 1]);
        assert_eq!(d.total(), 4);
        assert_eq!(d.get("missing"), 0);
    }

    #[test]
    fn mode_tie_goes_to_first_seen() {
        let d = Distribution::from_labels(["normal", "low"]);
        assert_eq!(d.mode(), Some("normal"));

        let d = Distribution::from_labels(["low", "normal", "normal", "low"]);
        assert_eq!(d.mode(), Some("low"));
    }

    #[test]
    fn mode_picks_strict_maximum() {
        let d = Distribution::from_labels(["good", "poor", "poor"]);
        assert_eq!(d.mode(), Some("poor"));
    }

    #[test]
    fn empty_distribution_has_no_mode() {
        assert_eq!(Distribution::new().mode(), None);
    }

    #[test]
    fn serializes_as_ordered_object() {
        let d = Distribution::from_labels(["normal", "low", "normal"]);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"normal":2,"low":1}"#);

        let back: Distribution = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
