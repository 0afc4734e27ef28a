/// Peer-selection strategies.
///
/// A strategy maps a node and the population to the peers that node
/// gossips to next. The variant set is closed, so it is an enum with
/// static dispatch. Strategies never touch node state; randomness comes
/// from the caller's seeded RNG so a whole experiment replays from one
/// seed.

use rand::seq::index;
use rand::Rng;

use crate::node::{NodeId, Population};

/// Peers drawn by [`Strategy::RandomUniform`].
pub const UNIFORM_FANOUT: usize = 4;

/// Ring offsets used by [`Strategy::FixedRingPair`].
pub const RING_PAIR_OFFSETS: [usize; 2] = [1, 2];

/// Ring offsets used by [`Strategy::FixedRingSkip`].
pub const RING_SKIP_OFFSETS: [usize; 4] = [1, 3, 7, 15];

/// Random offsets drawn by [`Strategy::RandomNeighbour`] after its fixed hop.
pub const RANDOM_NEIGHBOUR_PICKS: usize = 3;

/// How a node chooses whom to gossip to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Four distinct nodes drawn uniformly from the whole population.
    /// The sender itself may be among them.
    RandomUniform,
    /// The next two nodes on the ring.
    FixedRingPair,
    /// Ring offsets 1, 3, 7 and 15.
    FixedRingSkip,
    /// The next node on the ring, plus three independent uniform offsets.
    /// Duplicates among the random picks are left for the frontier to
    /// collapse.
    RandomNeighbour,
}

impl Strategy {
    /// Every strategy, in report order.
    pub const ALL: [Strategy; 4] = [
        Strategy::RandomUniform,
        Strategy::RandomNeighbour,
        Strategy::FixedRingPair,
        Strategy::FixedRingSkip,
    ];

    /// Human-readable name used in report headers.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::RandomUniform => "Random gossip",
            Strategy::FixedRingPair => "Next pair",
            Strategy::FixedRingSkip => "Skip few gossip",
            Strategy::RandomNeighbour => "Random neighbour gossip",
        }
    }

    /// `true` if peer selection consumes no randomness.
    pub fn is_deterministic(self) -> bool {
        matches!(self, Strategy::FixedRingPair | Strategy::FixedRingSkip)
    }

    /// Choose the peers `node` gossips to.
    ///
    /// The result may contain duplicates and may contain `node` itself.
    pub fn select_peers<R: Rng + ?Sized>(
        self,
        node: NodeId,
        population: &Population,
        rng: &mut R,
    ) -> Vec<NodeId> {
        let n = population.len();
        match self {
            Strategy::RandomUniform => index::sample(rng, n, UNIFORM_FANOUT.min(n))
                .into_iter()
                .map(NodeId::new)
                .collect(),
            Strategy::FixedRingPair => RING_PAIR_OFFSETS
                .iter()
                .map(|&k| population.offset(node, k))
                .collect(),
            Strategy::FixedRingSkip => RING_SKIP_OFFSETS
                .iter()
                .map(|&k| population.offset(node, k))
                .collect(),
            Strategy::RandomNeighbour => {
                let mut peers = Vec::with_capacity(1 + RANDOM_NEIGHBOUR_PICKS);
                peers.push(population.offset(node, 1));
                for _ in 0..RANDOM_NEIGHBOUR_PICKS {
                    peers.push(population.offset(node, rng.gen_range(0..n)));
                }
                peers
            }
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
