//! Two-level keyed counter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `outer -> inner -> count` table where missing keys start at zero.
///
/// Keys are kept ordered so serialization and bucketing are deterministic.
/// Serializes as a plain nested JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NestedCounter(BTreeMap<String, BTreeMap<String, u64>>);

impl NestedCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `(outer, inner)`.
    pub fn increment(&mut self, outer: &str, inner: &str) {
        self.add(outer, inner, 1);
    }

    /// Adds `count` to `(outer, inner)`.
    pub fn add(&mut self, outer: &str, inner: &str, count: u64) {
        // Only allocate owned keys on first touch.
        if let Some(row) = self.0.get_mut(outer) {
            match row.get_mut(inner) {
                Some(cell) => *cell += count,
                None => {
                    row.insert(inner.to_string(), count);
                }
            }
            return;
        }
        let mut row = BTreeMap::new();
        row.insert(inner.to_string(), count);
        self.0.insert(outer.to_string(), row);
    }

    /// Count for `(outer, inner)`; zero when never touched.
    pub fn get(&self, outer: &str, inner: &str) -> u64 {
        self.0
            .get(outer)
            .and_then(|row| row.get(inner))
            .copied()
            .unwrap_or(0)
    }

    /// All `(outer, inner, count)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> + '_ {
        self.0.iter().flat_map(|(outer, row)| {
            row.iter()
                .map(move |(inner, count)| (outer.as_str(), inner.as_str(), *count))
        })
    }

    /// Outer keys in order.
    pub fn outer_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }

    /// Inner table of one outer key.
    pub fn row(&self, outer: &str) -> Option<&BTreeMap<String, u64>> {
        self.0.get(outer)
    }

    /// Sum of every count.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, _, count)| count).sum()
    }

    /// True when nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_read_as_zero() {
        let counter = NestedCounter::new();
        assert_eq!(counter.get("text/html", "200"), 0);
        assert!(counter.is_empty());
    }

    #[test]
    fn test_increment_and_add() {
        let mut counter = NestedCounter::new();
        counter.increment("text/html", "200");
        counter.increment("text/html", "200");
        counter.add("text/html", "404", 5);
        counter.increment("image/png", "200");

        assert_eq!(counter.get("text/html", "200"), 2);
        assert_eq!(counter.get("text/html", "404"), 5);
        assert_eq!(counter.get("image/png", "200"), 1);
        assert_eq!(counter.total(), 8);
        assert_eq!(
            counter.outer_keys().collect::<Vec<_>>(),
            vec!["image/png", "text/html"]
        );
    }

    #[test]
    fn test_serializes_as_nested_object() {
        let mut counter = NestedCounter::new();
        counter.increment("2020", "01");
        counter.add("2020", "02", 3);
        let json = serde_json::to_string(&counter).unwrap();
        assert_eq!(json, r#"{"2020":{"01":1,"02":3}}"#);

        let back: NestedCounter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counter);
    }
}
