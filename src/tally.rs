/// Experiment tally: trial outcomes bucketed by rounds and coverage.

use std::collections::BTreeMap;

use crate::trial::TrialOutcome;

/// `rounds -> coverage -> occurrences`.
///
/// The sum of all occurrences always equals the number of outcomes
/// recorded. Both levels are ordered maps so reports come out in
/// ascending round order without sorting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentTally {
    buckets: BTreeMap<usize, BTreeMap<usize, u64>>,
}

impl ExperimentTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished trial.
    pub fn record(&mut self, outcome: &TrialOutcome) {
        *self
            .buckets
            .entry(outcome.rounds)
            .or_default()
            .entry(outcome.coverage)
            .or_insert(0) += 1;
    }

    /// Total trials recorded.
    pub fn total_trials(&self) -> u64 {
        self.buckets.values().map(|by_cov| by_cov.values().sum::<u64>()).sum()
    }

    /// Trials that finished after exactly `rounds` rounds.
    pub fn trials_at(&self, rounds: usize) -> u64 {
        self.buckets
            .get(&rounds)
            .map(|by_cov| by_cov.values().sum())
            .unwrap_or(0)
    }

    /// Trials at `rounds` that reached every one of `population_size` nodes.
    pub fn full_coverage_at(&self, rounds: usize, population_size: usize) -> u64 {
        self.count(rounds, population_size)
    }

    /// Trials, over all round counts, that reached every node.
    pub fn full_coverage_total(&self, population_size: usize) -> u64 {
        self.buckets
            .values()
            .filter_map(|by_cov| by_cov.get(&population_size))
            .sum()
    }

    /// Occurrences of a specific `(rounds, coverage)` pair.
    pub fn count(&self, rounds: usize, coverage: usize) -> u64 {
        self.buckets
            .get(&rounds)
            .and_then(|by_cov| by_cov.get(&coverage))
            .copied()
            .unwrap_or(0)
    }

    /// Round counts present, ascending.
    pub fn round_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.keys().copied()
    }

    /// `(rounds, coverage -> occurrences)` in ascending round order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeMap<usize, u64>)> {
        self.buckets.iter().map(|(r, by_cov)| (*r, by_cov))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
