/// Trial runner: one full dissemination of one packet.
///
/// A trial is an explicit state machine:
///
/// ```text
///   Init ──seed──▶ Running ──empty frontier──▶ Quiescent
///                     │
///                     └──round cap reached──▶ Capped
/// ```
///
/// The round cap is always enforced, so every trial terminates. A capped
/// trial is recorded exactly like a quiescent one.

use std::num::NonZeroUsize;

use rand::Rng;
use tracing::{trace, warn};

use crate::node::{NodeId, Population};
use crate::packet::{PacketId, PacketIdGen};
use crate::round::{execute_round, seed_origin, Frontier};
use crate::strategy::Strategy;

// ── Outcome ───────────────────────────────────────────────────────────

/// How a trial stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// A round produced an empty frontier.
    Quiescent,
    /// The round cap was reached while the frontier was still non-empty.
    Capped,
}

/// The recorded result of a finished trial.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialOutcome {
    pub packet: PacketId,
    pub origin: NodeId,
    /// Round in which the frontier came up empty, or the last round run
    /// when capped. The seeding step is round 0.
    pub rounds: usize,
    /// Nodes that hold the packet at the end of the trial.
    pub coverage: usize,
    pub termination: Termination,
}

// ── State ─────────────────────────────────────────────────────────────

/// Where a trial is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialState {
    /// Packet minted and origin chosen; nothing sent yet.
    Init,
    /// `frontier` holds the nodes first reached in round `round`; the
    /// seeding step is round 0.
    Running { round: usize, frontier: Frontier },
    Quiescent { rounds: usize },
    Capped { rounds: usize },
}

impl TrialState {
    /// `true` for `Quiescent` and `Capped`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrialState::Quiescent { .. } | TrialState::Capped { .. })
    }
}

// ── Trial ─────────────────────────────────────────────────────────────

/// A single packet's dissemination from a single origin.
#[derive(Debug, Clone)]
pub struct Trial {
    strategy: Strategy,
    packet: PacketId,
    origin: NodeId,
    round_cap: NonZeroUsize,
    state: TrialState,
}

impl Trial {
    /// Mint a fresh packet and pick a uniformly random origin.
    pub fn begin<R: Rng + ?Sized>(
        strategy: Strategy,
        packet_ids: &mut PacketIdGen,
        population: &Population,
        round_cap: NonZeroUsize,
        rng: &mut R,
    ) -> Self {
        let packet = packet_ids.next_id();
        let origin = NodeId::new(rng.gen_range(0..population.len()));
        Self::with_origin(strategy, packet, origin, round_cap)
    }

    /// A trial with a caller-chosen packet and origin.
    ///
    /// The cap is a `NonZeroUsize`: a trial always gets at least one
    /// round. Configurations carrying a zero cap are rejected earlier by
    /// [`SimConfig::validate`](crate::config::SimConfig::validate).
    pub fn with_origin(
        strategy: Strategy,
        packet: PacketId,
        origin: NodeId,
        round_cap: NonZeroUsize,
    ) -> Self {
        Trial {
            strategy,
            packet,
            origin,
            round_cap,
            state: TrialState::Init,
        }
    }

    pub fn packet(&self) -> PacketId {
        self.packet
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    pub fn state(&self) -> &TrialState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Advance by one transition.
    ///
    /// `Init` seeds the origin; each `Running` step executes exactly one
    /// round. Terminal states are left unchanged.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        population: &mut Population,
        rng: &mut R,
    ) -> &TrialState {
        let state = std::mem::replace(&mut self.state, TrialState::Init);
        self.state = match state {
            TrialState::Init => {
                let frontier =
                    seed_origin(self.origin, self.packet, self.strategy, population, rng);
                trace!(
                    packet = %self.packet,
                    origin = %self.origin,
                    frontier = frontier.len(),
                    "Seeded packet"
                );
                self.advance(0, frontier)
            }
            TrialState::Running { round, frontier } => {
                let next = execute_round(&frontier, self.packet, self.strategy, population, rng);
                trace!(packet = %self.packet, round = round + 1, frontier = next.len(), "Round executed");
                self.advance(round + 1, next)
            }
            terminal => terminal,
        };
        &self.state
    }

    /// State after `frontier` was produced in round `round`.
    fn advance(&self, round: usize, frontier: Frontier) -> TrialState {
        if frontier.is_empty() {
            TrialState::Quiescent { rounds: round }
        } else if round + 1 >= self.round_cap.get() {
            warn!(
                packet = %self.packet,
                strategy = %self.strategy,
                round_cap = self.round_cap.get(),
                "Trial hit the round cap"
            );
            TrialState::Capped { rounds: round }
        } else {
            TrialState::Running { round, frontier }
        }
    }

    /// Step until terminal and record the outcome.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        population: &mut Population,
        rng: &mut R,
    ) -> TrialOutcome {
        let (rounds, termination) = loop {
            match *self.step(population, rng) {
                TrialState::Quiescent { rounds } => break (rounds, Termination::Quiescent),
                TrialState::Capped { rounds } => break (rounds, Termination::Capped),
                _ => {}
            }
        };
        TrialOutcome {
            packet: self.packet,
            origin: self.origin,
            rounds,
            coverage: population.coverage(self.packet),
            termination,
        }
    }
}
