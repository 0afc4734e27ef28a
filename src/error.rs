//! Structured error types for the gossip simulator.
//!
//! Only construction is fallible: a `Population` or `SimConfig` that
//! could never run a trial is rejected before any trial starts. Once a
//! simulation is running every operation is total, and the round cap is
//! reported as [`Termination::Capped`](crate::trial::Termination) rather
//! than surfaced as an error.

use thiserror::Error;

use crate::node::NodeId;

/// The top-level error type for the gossip simulator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum GossipError {
    // ── Configuration errors ──────────────────────────────

    /// A population must contain at least one node.
    #[error("population size must be at least 1")]
    EmptyPopulation,

    /// An experiment must run at least one trial.
    #[error("trial count must be at least 1")]
    ZeroTrials,

    /// A trial must be allowed at least one round.
    #[error("round cap must be at least 1")]
    ZeroRoundCap,

    /// A parallel run needs at least one worker.
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    // ── Lookup errors ─────────────────────────────────────

    /// A node ID was referenced that is outside the population.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
}

/// Convenience alias for `Result<T, GossipError>`.
pub type GossipResult<T> = Result<T, GossipError>;
