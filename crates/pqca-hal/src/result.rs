//! Execution results and outcome counts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Counts of observed outcome bitstrings.
///
/// Bitstring convention: character 0 is the *highest*-indexed classical
/// bit — the mirror of the circuit's qubit index order. Consumers that
/// want bit 0 first must reverse the string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create an empty counts table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of a bitstring.
    pub fn record(&mut self, bitstring: impl Into<String>) {
        *self.0.entry(bitstring.into()).or_insert(0) += 1;
    }

    /// Get the count for a bitstring (zero if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// The most frequently observed bitstring, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(bits, count)| (bits.as_str(), *count))
    }

    /// Total number of recorded observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct bitstrings observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (bitstring, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(bits, count)| (bits.as_str(), *count))
    }
}

/// The result of executing a circuit for some number of shots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Observed outcome counts.
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
    fn test_record_accumulates() {
        let mut counts = Counts::new();
        counts.record("01");
        counts.record("01");
        counts.record("10");
        assert_eq!(counts.get("01"), 2);
        assert_eq!(counts.get("10"), 1);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_most_frequent() {
        let mut counts = Counts::new();
        counts.record("000");
        counts.record("111");
        counts.record("111");
        assert_eq!(counts.most_frequent(), Some(("111", 2)));
    }

    #[test]
    fn test_empty() {
        let counts = Counts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.most_frequent(), None);
    }
}
