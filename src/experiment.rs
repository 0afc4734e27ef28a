/// Experiment context and aggregator.
///
/// The context owns everything a run mutates: the population, the
/// packet-id counter and the RNG. The driver creates one and passes it
/// by `&mut` to every experiment, so nothing is process-global.
///
/// Experiments against one context share its population. Nodes keep
/// packets from earlier experiments, which is harmless because every
/// trial mints a packet id no node has seen.

use std::num::NonZeroUsize;
use std::thread;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::error::{GossipError, GossipResult};
use crate::node::Population;
use crate::packet::PacketIdGen;
use crate::strategy::Strategy;
use crate::tally::ExperimentTally;
use crate::trial::{Trial, TrialOutcome};

// ── Context ───────────────────────────────────────────────────────────

/// Mutable state threaded through every experiment of a run.
#[derive(Debug, Clone)]
pub struct ExperimentContext {
    config: SimConfig,
    round_cap: NonZeroUsize,
    population: Population,
    packet_ids: PacketIdGen,
    rng: ChaCha8Rng,
}

impl ExperimentContext {
    /// Validate `config` and build a fresh population.
    pub fn new(config: SimConfig) -> GossipResult<Self> {
        config.validate()?;
        let round_cap = NonZeroUsize::new(config.round_cap).ok_or(GossipError::ZeroRoundCap)?;
        let population = Population::new(config.population_size)?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(ExperimentContext {
            config,
            round_cap,
            population,
            packet_ids: PacketIdGen::new(),
            rng,
        })
    }

    /// A context for one parallel worker.
    ///
    /// `segment` selects both a disjoint packet-id range of
    /// `config.trials` ids and an independent RNG stream.
    pub fn for_segment(config: SimConfig, segment: u64) -> GossipResult<Self> {
        let mut ctx = Self::new(config)?;
        ctx.packet_ids = PacketIdGen::starting_at(segment * ctx.config.trials as u64);
        ctx.rng.set_stream(segment);
        Ok(ctx)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn packet_ids(&self) -> &PacketIdGen {
        &self.packet_ids
    }

    /// Split borrow used by the runner.
    fn parts(&mut self) -> (&mut Population, &mut PacketIdGen, &mut ChaCha8Rng) {
        (&mut self.population, &mut self.packet_ids, &mut self.rng)
    }
}

// ── Aggregator ────────────────────────────────────────────────────────

/// Run a single trial of `strategy` from a random origin.
pub fn run_trial(ctx: &mut ExperimentContext, strategy: Strategy) -> TrialOutcome {
    let round_cap = ctx.round_cap;
    let (population, packet_ids, rng) = ctx.parts();
    let mut trial = Trial::begin(strategy, packet_ids, population, round_cap, rng);
    trial.run(population, rng)
}

/// Run `config.trials` trials of `strategy` and tally the outcomes.
pub fn run_experiment(ctx: &mut ExperimentContext, strategy: Strategy) -> ExperimentTally {
    let trials = ctx.config.trials;
    info!(
        strategy = %strategy,
        trials,
        population = ctx.population.len(),
        seed = ctx.config.seed,
        "Starting experiment"
    );

    let mut tally = ExperimentTally::new();
    for _ in 0..trials {
        let outcome = run_trial(ctx, strategy);
        debug!(
            packet = %outcome.packet,
            origin = %outcome.origin,
            rounds = outcome.rounds,
            coverage = outcome.coverage,
            termination = ?outcome.termination,
            "Trial finished"
        );
        tally.record(&outcome);
    }

    info!(
        strategy = %strategy,
        full_coverage = tally.full_coverage_total(ctx.population.len()),
        trials = tally.total_trials(),
        "Experiment finished"
    );
    tally
}

/// Run each strategy on its own worker thread.
///
/// Strategy `k` gets a private context from
/// [`ExperimentContext::for_segment`] with segment `k`, so no mutable
/// state crosses threads and packet ids stay unique across the run.
/// Results come back in the order of `strategies`.
pub fn run_parallel(
    config: &SimConfig,
    strategies: &[Strategy],
    workers: usize,
) -> GossipResult<Vec<(Strategy, ExperimentTally)>> {
    if workers == 0 {
        return Err(GossipError::ZeroWorkers);
    }
    config.validate()?;

    let contexts = strategies
        .iter()
        .enumerate()
        .map(|(k, &strategy)| {
            ExperimentContext::for_segment(config.clone(), k as u64).map(|ctx| (k, strategy, ctx))
        })
        .collect::<GossipResult<Vec<_>>>()?;

    let mut results: Vec<Option<(Strategy, ExperimentTally)>> = vec![None; strategies.len()];
    let mut batches: Vec<Vec<_>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, job) in contexts.into_iter().enumerate() {
        batches[i % workers].push(job);
    }

    thread::scope(|scope| {
        let handles: Vec<_> = batches
            .into_iter()
            .filter(|batch| !batch.is_empty())
            .map(|batch| {
                scope.spawn(move || {
                    batch
                        .into_iter()
                        .map(|(k, strategy, mut ctx)| (k, strategy, run_experiment(&mut ctx, strategy)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let finished = handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
            for (k, strategy, tally) in finished {
                results[k] = Some((strategy, tally));
            }
        }
    });

    Ok(results.into_iter().flatten().collect())
}
