//! `Node`: a population member and the set of packets it has seen.

use std::collections::HashSet;

use crate::packet::PacketId;

use super::id::NodeId;

/// A simulated gossip participant.
///
/// The received-set only grows. `receive` is the single mutation path,
/// and it is called only by the round executor.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    received: HashSet<PacketId>,
}

impl Node {
    /// Create a node that has seen nothing yet.
    pub fn new(id: NodeId) -> Self {
        Node {
            id,
            received: HashSet::new(),
        }
    }

    /// This node's identity (its population index).
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Record `packet` as seen.
    ///
    /// Returns `true` the first time a packet arrives, meaning this node
    /// should gossip it onward. Returns `false` for a repeat delivery.
    pub fn receive(&mut self, packet: PacketId) -> bool {
        self.received.insert(packet)
    }

    /// Whether this node has already seen `packet`.
    #[inline]
    pub fn has_seen(&self, packet: PacketId) -> bool {
        self.received.contains(&packet)
    }

    /// Number of distinct packets this node has seen.
    pub fn seen_count(&self) -> usize {
        self.received.len()
    }
}
