//! `Population`: the fixed, ordered set of nodes an experiment runs on.

use crate::error::{GossipError, GossipResult};
use crate::packet::PacketId;

use super::host::Node;
use super::id::NodeId;

/// An ordered, fixed-size sequence of nodes indexed `0..N`.
///
/// Membership never changes after construction. Order matters: ring
/// strategies address peers by index offset modulo `N`, and each
/// node's [`NodeId`] is its index here.
///
/// Outside the crate nodes are read-only:
///
/// ```compile_fail
/// use gossip_sim::{NodeId, PacketId, Population};
///
/// let mut pop = Population::new(3).unwrap();
/// pop.node_mut(NodeId::new(0)).unwrap().receive(PacketId::new(1));
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    nodes: Vec<Node>,
}

impl Population {
    /// Build a population of `size` fresh nodes.
    pub fn new(size: usize) -> GossipResult<Self> {
        if size == 0 {
            return Err(GossipError::EmptyPopulation);
        }
        let nodes = (0..size).map(|i| Node::new(NodeId::new(i))).collect();
        Ok(Population { nodes })
    }

    /// Number of nodes (`N`).
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction rejects an empty population.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Immutable access to a node.
    pub fn node(&self, id: NodeId) -> GossipResult<&Node> {
        self.nodes.get(id.index()).ok_or(GossipError::NodeNotFound(id))
    }

    /// Mutable access to a node.
    ///
    /// Test-only: received-sets otherwise change only through the round executor.
    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> GossipResult<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(GossipError::NodeNotFound(id))
    }

    /// The node `offset` places after `from`, wrapping around the ring.
    #[inline]
    pub fn offset(&self, from: NodeId, offset: usize) -> NodeId {
        let n = self.nodes.len();
        NodeId::new((from.index() % n + offset % n) % n)
    }

    /// All node IDs in population order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(Node::id)
    }

    /// Iterate over the nodes in population order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// How many nodes have seen `packet`.
    pub fn coverage(&self, packet: PacketId) -> usize {
        self.nodes.iter().filter(|n| n.has_seen(packet)).count()
    }

    /// Deliver `packet` to `id`, returning whether it was new there.
    ///
    /// Unknown IDs are ignored and report `false`; strategies only ever
    /// produce in-range IDs.
    pub(crate) fn deliver(&mut self, id: NodeId, packet: PacketId) -> bool {
        self.nodes
            .get_mut(id.index())
            .map(|node| node.receive(packet))
            .unwrap_or(false)
    }
}
