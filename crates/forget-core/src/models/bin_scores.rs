use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Ordered `(bin, score)` pairs.
///
/// Order is whatever produced it: descending score for a collection fetch,
/// the primary's order for a trend fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinScores {
    entries: Vec<(String, f64)>,
}

impl BinScores {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, bin: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == bin)
            .map(|(_, score)| *score)
    }

    pub fn contains(&self, bin: &str) -> bool {
        self.get(bin).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn bins(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }

    pub fn into_map(self) -> HashMap<String, f64> {
        self.entries.into_iter().collect()
    }

    pub fn into_vec(self) -> Vec<(String, f64)> {
        self.entries
    }
}

impl FromIterator<(String, f64)> for BinScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
