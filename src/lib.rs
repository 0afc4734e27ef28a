//! # gossip-sim: Gossip Propagation Simulator
//!
//! Measures how well different peer-selection strategies spread a single
//! packet through a fixed population by epidemic gossip. Synchronous and
//! single-threaded; the only nondeterminism is the seeded RNG that the
//! random strategies draw from.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │    ExperimentContext      │ ← population, packet ids, RNG
//! │  ┌────────────────────┐  │
//! │  │  run_experiment     │  │ ← N trials → ExperimentTally
//! │  │  ┌──────────────┐   │  │
//! │  │  │    Trial      │   │  │ ← Init → Running → Quiescent | Capped
//! │  │  │  ┌────────┐   │   │  │
//! │  │  │  │ round  │   │   │  │ ← frontier → next frontier
//! │  │  │  └────────┘   │   │  │
//! │  │  │  ┌────────┐   │   │  │
//! │  │  │  │Strategy│   │   │  │ ← node → peers
//! │  │  │  └────────┘   │   │  │
//! │  │  └──────────────┘   │  │
//! │  └────────────────────┘  │
//! └──────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod experiment;
pub mod node;
pub mod packet;
pub mod report;
pub mod round;
pub mod strategy;
pub mod tally;
pub mod trial;

// Re-exports for convenience.
pub use config::SimConfig;
pub use error::{GossipError, GossipResult};
pub use experiment::{run_experiment, run_parallel, run_trial, ExperimentContext};
pub use node::{Node, NodeId, Population};
pub use packet::{PacketId, PacketIdGen};
pub use report::Report;
pub use round::{execute_round, seed_origin, Frontier};
pub use strategy::Strategy;
pub use tally::ExperimentTally;
pub use trial::{Termination, Trial, TrialOutcome, TrialState};
