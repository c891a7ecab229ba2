//! Value counting over trip columns.
//!
//! [`Tally`] groups keys into occurrence counts and answers the mode,
//! ranked-count and min/max questions the statistics reports ask.
//!
//! Ties on the maximum count are broken by key order: the smallest key wins.

use std::collections::BTreeMap;

// ── Tally ─────────────────────────────────────────────────────────────────────

/// Occurrence counts keyed by value, kept in ascending key order.
#[derive(Debug, Clone)]
pub struct Tally<K: Ord> {
    counts: BTreeMap<K, u64>,
    total: u64,
}

impl<K: Ord> Default for Tally<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<K: Ord> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    /// Number of occurrences recorded across all keys.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct keys.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, key: &K) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// The key with the highest count, with that count.
    ///
    /// Among keys sharing the highest count, the smallest key is returned.
    /// `None` when nothing was recorded.
    pub fn most_common(&self) -> Option<(&K, u64)> {
        let mut best: Option<(&K, u64)> = None;
        for (key, &count) in &self.counts {
            // Strictly greater: keys arrive ascending, so the first one seen
            // at the maximum stays.
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best
    }

    /// Every key with its count, highest count first, ties by ascending key.
    pub fn ranked(&self) -> Vec<(&K, u64)> {
        let mut ranked: Vec<(&K, u64)> = self.counts.iter().map(|(k, &c)| (k, c)).collect();
        // Stable sort keeps the ascending key order within equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn min_key(&self) -> Option<&K> {
        self.counts.keys().next()
    }

    pub fn max_key(&self) -> Option<&K> {
        self.counts.keys().next_back()
    }
}

impl<K: Ord> Extend<K> for Tally<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        tally.extend(iter);
        tally
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
