//! Node ID: the stable position of a node in its population.

/// A unique identifier for a simulated node.
///
/// The wrapped value is the node's index in the [`Population`], so the
/// ring strategies can compute neighbours by offset in O(1) instead of
/// searching for the node.
///
/// [`Population`]: super::Population
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Create a node ID from a population index.
    #[inline]
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Return the population index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "N{}", self.0)
    }
}
