//! Execution results and measurement counts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by outcome bitstring.
///
/// Insertion accumulates: inserting the same bitstring twice sums the
/// counts, so a backend can record shots one at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of observations of `bitstring` (0 if never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// The most frequently observed outcome, if any.
    ///
    /// Ties are broken towards the lexicographically smallest bitstring so
    /// the answer is deterministic.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then(kb.cmp(ka)))
            .map(|(k, v)| (k.as_str(), *v))
    }

    /// Total number of recorded observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (bitstring, count) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The result of executing a circuit on a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Wall-clock execution time in milliseconds, if measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = Some(millis);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("01", 1);
        counts.insert("01", 1);
        counts.insert("10", 5);
        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total(), 7);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.insert("0", 30);
        counts.insert("1", 70);
        assert_eq!(counts.most_frequent(), Some(("1", 70)));
    }

    #[test]
    fn test_most_frequent_tie_is_deterministic() {
        let mut counts = Counts::new();
        counts.insert("1", 50);
        counts.insert("0", 50);
        assert_eq!(counts.most_frequent(), Some(("0", 50)));
    }

    #[test]
    fn test_execution_result() {
        let mut counts = Counts::new();
        counts.insert("00", 100);
        let result = ExecutionResult::new(counts, 100).with_execution_time(12);
        assert_eq!(result.shots, 100);
        assert_eq!(result.execution_time_ms, Some(12));
    }
}
