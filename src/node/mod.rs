//! Nodes and the population they live in.
//!
//! A node is nothing more than an identity plus the set of packets it
//! has seen. The population owns every node; nothing else holds one.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`id`] | [`NodeId`] newtype |
//! | [`host`] | [`Node`] and its received-set |
//! | [`population`] | [`Population`] |

pub mod host;
pub mod id;
pub mod population;

// Flat re-exports so external callers can use `gossip_sim::node::NodeId` etc.
pub use host::Node;
pub use id::NodeId;
pub use population::Population;
