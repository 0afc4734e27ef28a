/// Tunable parameters for a gossip experiment.
///
/// These are compile-time defaults with builder overrides for library
/// callers and tests. The binary runs with the defaults and a random
/// seed; there are no flags or config files.

use crate::error::{GossipError, GossipResult};

/// Number of nodes in the population.
pub const DEFAULT_POPULATION_SIZE: usize = 1000;

/// Trials per experiment.
pub const DEFAULT_TRIALS: usize = 1000;

/// Hard upper bound on rounds in a single trial.
pub const DEFAULT_ROUND_CAP: usize = 10_000;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for one experiment context.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Population size `N`.
    pub population_size: usize,
    /// Trials run per strategy.
    pub trials: usize,
    /// Rounds after which a trial is declared capped.
    pub round_cap: usize,
    /// Seed for the experiment RNG.
    pub seed: u64,
}

impl SimConfig {
    /// Defaults for every parameter.
    pub fn new() -> Self {
        SimConfig {
            population_size: DEFAULT_POPULATION_SIZE,
            trials: DEFAULT_TRIALS,
            round_cap: DEFAULT_ROUND_CAP,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_round_cap(mut self, cap: usize) -> Self {
        self.round_cap = cap;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations that could never run a trial.
    pub fn validate(&self) -> GossipResult<()> {
        if self.population_size == 0 {
            return Err(GossipError::EmptyPopulation);
        }
        if self.trials == 0 {
            return Err(GossipError::ZeroTrials);
        }
        if self.round_cap == 0 {
            return Err(GossipError::ZeroRoundCap);
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
