/// Round executor: advance one packet's spread by one round.
///
/// This is the only place propagation state is mutated. Each active node
/// asks the strategy for peers and delivers the packet to each of them;
/// peers that see the packet for the first time form the next frontier.

use std::collections::BTreeSet;

use rand::Rng;

use crate::node::{NodeId, Population};
use crate::packet::PacketId;
use crate::strategy::Strategy;

/// Nodes that newly received the packet in the previous round.
///
/// A `BTreeSet` so duplicate targets collapse and iteration order (and
/// with it RNG consumption) is fixed for a given seed.
pub type Frontier = BTreeSet<NodeId>;

/// Seed a packet at `origin` and perform the origin's own gossip step.
///
/// The origin records the packet, then delivers it to its selected
/// peers. Returns the peers that were newly infected. If the origin had
/// already seen the packet nothing is sent and the frontier is empty.
pub fn seed_origin<R: Rng + ?Sized>(
    origin: NodeId,
    packet: PacketId,
    strategy: Strategy,
    population: &mut Population,
    rng: &mut R,
) -> Frontier {
    if !population.deliver(origin, packet) {
        return Frontier::new();
    }
    gossip_from(origin, packet, strategy, population, rng, Frontier::new())
}

/// Run one propagation round from every node in `frontier`.
///
/// Returns the set of peers that received `packet` for the first time.
/// An empty result means the packet has stopped spreading.
pub fn execute_round<R: Rng + ?Sized>(
    frontier: &Frontier,
    packet: PacketId,
    strategy: Strategy,
    population: &mut Population,
    rng: &mut R,
) -> Frontier {
    frontier.iter().fold(Frontier::new(), |next, &sender| {
        gossip_from(sender, packet, strategy, population, rng, next)
    })
}

fn gossip_from<R: Rng + ?Sized>(
    sender: NodeId,
    packet: PacketId,
    strategy: Strategy,
    population: &mut Population,
    rng: &mut R,
    mut next: Frontier,
) -> Frontier {
    for peer in strategy.select_peers(sender, population, rng) {
        if population.deliver(peer, packet) {
            next.insert(peer);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn frontier(raw: &[usize]) -> Frontier {
        raw.iter().copied().map(NodeId::new).collect()
    }

    #[test]
    fn test_seed_ring_pair() {
        let mut pop = Population::new(10).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = PacketId::new(1);

        let f = seed_origin(NodeId::new(0), p, Strategy::FixedRingPair, &mut pop, &mut rng);

        assert_eq!(f, frontier(&[1, 2]));
        assert_eq!(pop.coverage(p), 3);
        assert!(pop.node(NodeId::new(0)).unwrap().has_seen(p));
    }

    #[test]
    fn test_round_filters_already_seen() {
        let mut pop = Population::new(10).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = PacketId::new(1);

        let f0 = seed_origin(NodeId::new(0), p, Strategy::FixedRingPair, &mut pop, &mut rng);
        let f1 = execute_round(&f0, p, Strategy::FixedRingPair, &mut pop, &mut rng);

        // 1 -> {2, 3}, 2 -> {3, 4}; 2 was already seen, 3 counted once.
        assert_eq!(f1, frontier(&[3, 4]));
        assert_eq!(pop.coverage(p), 5);
    }

    #[test]
    fn test_empty_frontier_yields_empty() {
        let mut pop = Population::new(10).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let next = execute_round(
            &Frontier::new(),
            PacketId::new(1),
            Strategy::RandomUniform,
            &mut pop,
            &mut rng,
        );
        assert!(next.is_empty());
        assert_eq!(pop.coverage(PacketId::new(1)), 0);
    }

    #[test]
    fn test_seed_on_already_seen_origin_sends_nothing() {
        let mut pop = Population::new(10).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = PacketId::new(1);
        pop.node_mut(NodeId::new(4)).unwrap().receive(p);

        let f = seed_origin(NodeId::new(4), p, Strategy::FixedRingSkip, &mut pop, &mut rng);
        assert!(f.is_empty());
        assert_eq!(pop.coverage(p), 1);
    }

    #[test]
    fn test_single_node_population_quiesces_immediately() {
        let mut pop = Population::new(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let p = PacketId::new(1);
        for strategy in Strategy::ALL {
            let mut pop_s = pop.clone();
            let f = seed_origin(NodeId::new(0), p, strategy, &mut pop_s, &mut rng);
            assert!(f.is_empty(), "{} should not spread on N=1", strategy);
        }
        assert!(seed_origin(NodeId::new(0), p, Strategy::FixedRingPair, &mut pop, &mut rng).is_empty());
        assert_eq!(pop.coverage(p), 1);
    }
}
