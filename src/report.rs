/// Plain-text rendering of an experiment tally.
///
/// One line per round count present, giving the share of trials at that
/// round count that reached the whole population, then an `Overall`
/// line over all trials. Shares are computed from integer counts at
/// print time.

use std::fmt;

use crate::strategy::Strategy;
use crate::tally::ExperimentTally;

/// A printable view over a tally.
pub struct Report<'a> {
    tally: &'a ExperimentTally,
    population_size: usize,
}

impl<'a> Report<'a> {
    pub fn new(tally: &'a ExperimentTally, population_size: usize) -> Self {
        Report {
            tally,
            population_size,
        }
    }

    /// Fraction of trials at `rounds` that reached every node.
    pub fn full_coverage_ratio_at(&self, rounds: usize) -> f64 {
        ratio(
            self.tally.full_coverage_at(rounds, self.population_size),
            self.tally.trials_at(rounds),
        )
    }

    /// Fraction of all trials that reached every node.
    pub fn overall_ratio(&self) -> f64 {
        ratio(
            self.tally.full_coverage_total(self.population_size),
            self.tally.total_trials(),
        )
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rounds in self.tally.round_counts() {
            writeln!(
                f,
                "Iterations {:2}: {:>6}",
                rounds,
                percent(self.full_coverage_ratio_at(rounds))
            )?;
        }
        writeln!(f, "Overall:       {:>6}", percent(self.overall_ratio()))
    }
}

/// Section header printed before a strategy's report.
pub fn header(strategy: Strategy) -> String {
    format!("===== {} =====", strategy.name())
}

fn ratio(hits: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

fn percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
