use std::fmt::Debug;

use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::Route;
use crate::pathway::distance_cache::{DistanceCache, PairKey};
use crate::pathway::partition::Partition;

/// Selection regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing absorbed yet: global minimum over sources x targets
    Bootstrap,
    /// Minimum over pairs joining a visited vertex and a not-visited one
    Growth,
}

/// The pair chosen for absorption together with its cached route
#[derive(Debug, Clone)]
pub struct Selection<W> {
    pub phase: Phase,
    pub key: PairKey,
    pub route: Route<W>,
}

/// Greedy choice of the next path to absorb.
///
/// Enumeration order is the tie-break: sources and targets in their given order
/// during bootstrap; visited vertices in absorption order, then not-visited vertices
/// in insertion order during growth, with `(visited, not_visited)` checked before
/// `(not_visited, visited)`.
#[derive(Debug, Clone, Copy)]
pub struct PathSelector<'a> {
    sources: &'a [usize],
    targets: &'a [usize],
}

impl<'a> PathSelector<'a> {
    pub fn new(sources: &'a [usize], targets: &'a [usize]) -> Self {
        PathSelector { sources, targets }
    }

    pub fn phase(partition: &Partition) -> Phase {
        if partition.visited().is_empty() {
            Phase::Bootstrap
        } else {
            Phase::Growth
        }
    }

    /// Returns the cheapest admissible pair, or `None` if every candidate is
    /// absent, unreachable or tombstoned
    pub fn select<W>(&self, cache: &DistanceCache<W>, partition: &Partition) -> Option<Selection<W>>
    where
        W: Float + Zero + Debug + Copy,
    {
        let phase = Self::phase(partition);
        let key = match phase {
            Phase::Bootstrap => cache.best_over(self.bootstrap_candidates()),
            Phase::Growth => cache.best_over(Self::growth_candidates(partition)),
        }?;
        let route = cache.get(&key)?.clone();
        Some(Selection { phase, key, route })
    }

    fn bootstrap_candidates(&self) -> impl Iterator<Item = PairKey> + 'a {
        let (sources, targets) = (self.sources, self.targets);
        sources
            .iter()
            .flat_map(move |&s| targets.iter().map(move |&t| (s, t)))
    }

    fn growth_candidates(partition: &Partition) -> impl Iterator<Item = PairKey> + '_ {
        let not_visited = partition.not_visited();
        partition
            .visited()
            .iter()
            .flat_map(move |v| not_visited.iter().flat_map(move |n| [(v, n), (n, v)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::oracle::NetworkOracle;
    use crate::graph::{DirectedGraph, MutableGraph};
    use ordered_float::OrderedFloat;

    type W = OrderedFloat<f64>;

    #[test]
    fn test_bootstrap_tie_goes_to_enumeration_order() {
        // 0 -> 1 -> {2, 3}: (0,2) and (0,3) both cost 2
        let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(4);
        graph.add_edge(0, 1, OrderedFloat(1.0));
        graph.add_edge(1, 2, OrderedFloat(1.0));
        graph.add_edge(1, 3, OrderedFloat(1.0));
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);

        let partition = Partition::new(4, &[0], &[3, 2]);
        let cache = DistanceCache::initialize(&oracle, &[0], &[3, 2]).unwrap();
        let selection = PathSelector::new(&[0], &[3, 2]).select(&cache, &partition).unwrap();

        assert_eq!(selection.phase, Phase::Bootstrap);
        assert_eq!(selection.key, (0, 3));
        assert_eq!(selection.route.path, vec![0, 1, 3]);
    }

    #[test]
    fn test_growth_prefers_visited_to_not_visited_direction_on_ties() {
        // 4 is both a source and a target; 1 <-> 4 cost the same both ways
        let mut graph: DirectedGraph<W> = DirectedGraph::with_capacity(5);
        graph.add_edge(0, 1, OrderedFloat(1.0));
        graph.add_edge(1, 2, OrderedFloat(1.0));
        graph.add_edge(1, 4, OrderedFloat(5.0));
        graph.add_edge(4, 1, OrderedFloat(5.0));
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);

        let sources: [usize; 2] = [0, 4];
        let targets: [usize; 2] = [2, 4];
        let mut partition = Partition::new(5, &sources, &targets);
        let mut cache = DistanceCache::initialize(&oracle, &sources, &targets).unwrap();
        let selector = PathSelector::new(&sources, &targets);

        let first = selector.select(&cache, &partition).unwrap();
        assert_eq!(first.key, (0, 2));
        cache.tombstone(first.key);
        partition.absorb(&first.route.path);
        cache.extend(&oracle, 1, &sources, &targets).unwrap();

        let second = selector.select(&cache, &partition).unwrap();
        assert_eq!(second.phase, Phase::Growth);
        assert_eq!(second.key, (1, 4));
        assert_eq!(second.route.path, vec![1, 4]);
    }

    #[test]
    fn test_no_admissible_pair() {
        let graph: DirectedGraph<W> = DirectedGraph::with_capacity(2);
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let partition = Partition::new(2, &[0], &[1]);
        let cache = DistanceCache::initialize(&oracle, &[0], &[1]).unwrap();

        assert!(PathSelector::new(&[0], &[1]).select(&cache, &partition).is_none());
    }
}
