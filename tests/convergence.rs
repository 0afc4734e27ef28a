//! End-to-end convergence properties of the gossip engine.

use gossip_sim::Strategy as PeerStrategy;
use gossip_sim::{
    run_experiment, run_trial, ExperimentContext, NodeId, PacketId, Population, Report,
    SimConfig, Termination, Trial, TrialState,
};
use std::num::NonZeroUsize;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cap(rounds: usize) -> NonZeroUsize {
    NonZeroUsize::new(rounds).unwrap()
}

/// N=10, ring pair: every trial reaches all ten nodes and quiesces at round five.
#[test]
fn test_ring_pair_ten_nodes_every_trial() {
    let config = SimConfig::new()
        .with_population_size(10)
        .with_trials(100)
        .with_seed(3);
    let mut ctx = ExperimentContext::new(config).unwrap();
    let tally = run_experiment(&mut ctx, PeerStrategy::FixedRingPair);

    assert_eq!(tally.total_trials(), 100);
    assert_eq!(tally.full_coverage_total(10), 100);
    assert_eq!(tally.trials_at(5), 100);
    assert_eq!(
        Report::new(&tally, 10).to_string(),
        "Iterations  5: 100.00%\n\
         Overall:       100.00%\n"
    );
}

/// Overall percentage is exactly full-coverage trials over all trials.
#[test]
fn test_random_uniform_overall_matches_tally() {
    let config = SimConfig::new()
        .with_population_size(1000)
        .with_trials(200)
        .with_seed(2024);
    let mut ctx = ExperimentContext::new(config).unwrap();
    let tally = run_experiment(&mut ctx, PeerStrategy::RandomUniform);
    let report = Report::new(&tally, 1000);

    let expected = tally.full_coverage_total(1000) as f64 / 200.0;
    assert_eq!(report.overall_ratio(), expected);
    let line = format!("Overall:       {:>6}\n", format!("{:.2}%", expected * 100.0));
    assert!(report.to_string().ends_with(&line));
}

/// Sequential trials on one population never disturb each other's packets.
#[test]
fn test_membership_is_monotone_across_trials() {
    let mut pop = Population::new(300).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let first = Trial::with_origin(PeerStrategy::RandomUniform, PacketId::new(1), NodeId::new(0), cap(10_000))
        .run(&mut pop, &mut rng);
    let holders: Vec<NodeId> = pop
        .iter()
        .filter(|n| n.has_seen(first.packet))
        .map(|n| n.id())
        .collect();

    let second = Trial::with_origin(PeerStrategy::RandomNeighbour, PacketId::new(2), NodeId::new(5), cap(10_000))
        .run(&mut pop, &mut rng);

    assert_ne!(first.packet, second.packet);
    assert_eq!(pop.coverage(first.packet), first.coverage);
    for id in holders {
        assert!(pop.node(id).unwrap().has_seen(first.packet));
    }
}

/// Ring strategies produce the same frontier sequence on every replay.
#[test]
fn test_ring_frontiers_replay_identically() {
    fn frontiers(strategy: PeerStrategy) -> Vec<TrialState> {
        let mut pop = Population::new(64).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut trial = Trial::with_origin(strategy, PacketId::new(1), NodeId::new(10), cap(10_000));
        let mut states = Vec::new();
        while !trial.is_finished() {
            states.push(trial.step(&mut pop, &mut rng).clone());
        }
        states
    }

    for strategy in [PeerStrategy::FixedRingPair, PeerStrategy::FixedRingSkip] {
        assert_eq!(frontiers(strategy), frontiers(strategy));
    }
}

#[test]
fn test_capped_trials_are_tallied() {
    let config = SimConfig::new()
        .with_population_size(500)
        .with_trials(10)
        .with_round_cap(5)
        .with_seed(1);
    let mut ctx = ExperimentContext::new(config).unwrap();

    let outcome = run_trial(&mut ctx, PeerStrategy::FixedRingPair);
    assert_eq!(outcome.termination, Termination::Capped);
    assert_eq!(outcome.rounds, 4);
    assert_eq!(outcome.coverage, 11);

    let tally = run_experiment(&mut ctx, PeerStrategy::FixedRingPair);
    assert_eq!(tally.total_trials(), 10);
    assert_eq!(tally.trials_at(4), 10);
    assert_eq!(tally.full_coverage_total(500), 0);
}

fn any_strategy() -> impl Strategy<Value = PeerStrategy> {
    prop_oneof![
        Just(PeerStrategy::RandomUniform),
        Just(PeerStrategy::FixedRingPair),
        Just(PeerStrategy::FixedRingSkip),
        Just(PeerStrategy::RandomNeighbour),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_outcome_within_bounds(
        strategy in any_strategy(),
        size in 1usize..80,
        cap in 1usize..50,
        seed in any::<u64>(),
    ) {
        let config = SimConfig::new()
            .with_population_size(size)
            .with_trials(5)
            .with_round_cap(cap)
            .with_seed(seed);
        let mut ctx = ExperimentContext::new(config).unwrap();
        for _ in 0..5 {
            let outcome = run_trial(&mut ctx, strategy);
            prop_assert!(outcome.coverage >= 1);
            prop_assert!(outcome.coverage <= size);
            prop_assert!(outcome.rounds <= cap);
        }
    }

    #[test]
    fn prop_tally_sums_to_trials(
        strategy in any_strategy(),
        trials in 1usize..30,
        seed in any::<u64>(),
    ) {
        let config = SimConfig::new()
            .with_population_size(40)
            .with_trials(trials)
            .with_seed(seed);
        let mut ctx = ExperimentContext::new(config).unwrap();
        let tally = run_experiment(&mut ctx, strategy);
        prop_assert_eq!(tally.total_trials(), trials as u64);
    }
}
