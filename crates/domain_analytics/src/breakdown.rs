//! Insertion-ordered group counts
//!
//! Chart renderers draw breakdown slices in the order categories were first
//! seen, so a breakdown keeps that order through iteration and serialization.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Count of policies per category, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    buckets: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl Breakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `key`, appending it if unseen
    pub fn increment(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&i) => self.buckets[i].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.buckets.len());
                self.buckets.push((key.to_string(), 1));
            }
        }
    }

    /// Count for `key`, zero if unseen
    pub fn get(&self, key: &str) -> u64 {
        self.index.get(key).map_or(0, |&i| self.buckets[i].1)
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.buckets.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.buckets.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(k, _)| k.as_str())
    }
}

impl<'a> FromIterator<&'a str> for Breakdown {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut breakdown = Breakdown::new();
        for key in iter {
            breakdown.increment(key);
        }
        breakdown
    }
}

impl Serialize for Breakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (key, count) in &self.buckets {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}
