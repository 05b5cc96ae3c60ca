use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Instant;

use log::{debug, info};
use num_traits::{Float, Zero};

use crate::algorithm::{PathOracle, Route};
use crate::Result;

/// Ordered `(from, to)` vertex pair used as a cache key
pub type PairKey = (usize, usize);

/// Shortest routes between pairs of not-yet-connected vertices.
///
/// Keys are never removed. A consumed pair is tombstoned instead: its distance is
/// forced to infinity and its path cleared, so it can never win a selection again.
#[derive(Debug, Clone)]
pub struct DistanceCache<W>
where
    W: Float + Zero + Debug + Copy,
{
    entries: HashMap<PairKey, Route<W>>,
}

impl<W> DistanceCache<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Creates an empty cache
    pub fn new() -> Self {
        DistanceCache {
            entries: HashMap::new(),
        }
    }

    /// Computes the shortest route for every `(source, target)` pair.
    ///
    /// A vertex that is both a source and a target gets a tombstoned self-pair.
    pub fn initialize<O>(oracle: &O, sources: &[usize], targets: &[usize]) -> Result<Self>
    where
        O: PathOracle<W>,
    {
        Ok(Self::initialize_until(oracle, sources, targets, None)?.unwrap_or_default())
    }

    /// Like [`DistanceCache::initialize`], but gives up with `None` once `deadline`
    /// has passed. The deadline is checked before each pair is computed.
    pub fn initialize_until<O>(
        oracle: &O,
        sources: &[usize],
        targets: &[usize],
        deadline: Option<Instant>,
    ) -> Result<Option<Self>>
    where
        O: PathOracle<W>,
    {
        let mut cache = DistanceCache::new();
        let mut unreachable = 0;

        for &s in sources {
            for &t in targets {
                if s == t {
                    cache.tombstone((s, t));
                    continue;
                }
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        debug!("Deadline passed with {} pairs computed", cache.len());
                        return Ok(None);
                    }
                }
                if !cache.compute(oracle, (s, t))? {
                    unreachable += 1;
                }
            }
        }

        info!(
            "Initialized distance cache with {} source-target pairs ({} unreachable)",
            cache.len(),
            unreachable
        );
        Ok(Some(cache))
    }

    /// Computes and stores one pair; returns whether it is reachable
    fn compute<O>(&mut self, oracle: &O, key: PairKey) -> Result<bool>
    where
        O: PathOracle<W>,
    {
        let route = oracle.shortest_path(key.0, key.1)?;
        let reachable = route.is_finite();
        if !reachable {
            debug!("There is no path between {} and {}", key.0, key.1);
        }
        self.entries.insert(key, route);
        Ok(reachable)
    }

    /// Adds the pairs that connect a newly absorbed intermediate vertex to every
    /// source (`(s, node)`) and every target (`(node, t)`), and tombstones
    /// `(node, node)`. Keys already present are left untouched.
    ///
    /// Returns the number of keys added.
    pub fn extend<O>(&mut self, oracle: &O, node: usize, sources: &[usize], targets: &[usize]) -> Result<usize>
    where
        O: PathOracle<W>,
    {
        let before = self.len();

        let keys = sources
            .iter()
            .map(|&s| (s, node))
            .chain(targets.iter().map(|&t| (node, t)));
        for key in keys {
            if key.0 == key.1 || self.entries.contains_key(&key) {
                continue;
            }
            self.compute(oracle, key)?;
        }
        self.tombstone((node, node));

        let added = self.len() - before;
        debug!("Extended distance cache through vertex {} with {} pairs", node, added);
        Ok(added)
    }

    /// Scans `candidates` in order and returns the key with the strictly smallest
    /// finite distance. Absent keys are skipped; on ties the earliest key wins.
    pub fn best_over<I>(&self, candidates: I) -> Option<PairKey>
    where
        I: IntoIterator<Item = PairKey>,
    {
        let mut best: Option<(PairKey, W)> = None;
        for key in candidates {
            let Some(route) = self.entries.get(&key) else {
                continue;
            };
            if !route.is_finite() {
                continue;
            }
            match best {
                Some((_, distance)) if route.distance >= distance => {}
                _ => best = Some((key, route.distance)),
            }
        }
        best.map(|(key, _)| key)
    }

    /// Permanently excludes a key from selection, inserting it if needed
    pub fn tombstone(&mut self, key: PairKey) {
        self.entries.insert(key, Route::unreachable());
    }

    pub fn get(&self, key: &PairKey) -> Option<&Route<W>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PairKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Cached distance of a key, `None` when the key is absent
    pub fn distance(&self, key: &PairKey) -> Option<W> {
        self.entries.get(key).map(|route| route.distance)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<W> Default for DistanceCache<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::oracle::NetworkOracle;
    use crate::graph::{DirectedGraph, MutableGraph};
    use ordered_float::OrderedFloat;

    type W = OrderedFloat<f64>;

    // 0 -> 1 (1.0), 1 -> 2 (1.0), 3 -> 1 (2.0), 1 -> 4 (1.0)
    fn bow_tie() -> DirectedGraph<W> {
        let mut graph = DirectedGraph::with_capacity(5);
        graph.add_edge(0, 1, OrderedFloat(1.0));
        graph.add_edge(1, 2, OrderedFloat(1.0));
        graph.add_edge(3, 1, OrderedFloat(2.0));
        graph.add_edge(1, 4, OrderedFloat(1.0));
        graph
    }

    #[test]
    fn test_initialize_covers_every_source_target_pair() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let cache = DistanceCache::initialize(&oracle, &[0, 3], &[2, 4, 0]).unwrap();

        assert_eq!(cache.len(), 6);
        assert_eq!(cache.get(&(0, 2)).unwrap().path, vec![0, 1, 2]);
        assert_eq!(cache.distance(&(3, 4)), Some(OrderedFloat(3.0)));
        // 0 is both a source and a target: its self-pair is excluded up front
        assert_eq!(cache.get(&(0, 0)), Some(&Route::unreachable()));
        // 3 cannot reach 0: recorded, not an error
        assert_eq!(cache.get(&(3, 0)), Some(&Route::unreachable()));
    }

    #[test]
    fn test_initialize_until_gives_up_after_deadline() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);

        let expired = DistanceCache::initialize_until(&oracle, &[0, 3], &[2, 4], Some(Instant::now())).unwrap();
        assert!(expired.is_none());

        let far = Instant::now() + std::time::Duration::from_secs(3600);
        let cache = DistanceCache::initialize_until(&oracle, &[0, 3], &[2, 4], Some(far)).unwrap().unwrap();
        assert_eq!(cache.len(), 4);
    }

    #[test]
    fn test_best_over_prefers_earliest_on_ties() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let cache = DistanceCache::initialize(&oracle, &[0, 3], &[2, 4]).unwrap();

        assert_eq!(cache.best_over([(0, 2), (0, 4), (3, 2)]), Some((0, 2)));
        assert_eq!(cache.best_over([(0, 4), (0, 2)]), Some((0, 4)));
        assert_eq!(cache.best_over([(3, 2), (9, 9), (0, 4)]), Some((0, 4)));
        assert_eq!(cache.best_over([(9, 9)]), None);
    }

    #[test]
    fn test_tombstoned_keys_stay_present_but_unselectable() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let mut cache = DistanceCache::initialize(&oracle, &[0, 3], &[2, 4]).unwrap();

        cache.tombstone((0, 2));
        assert!(cache.contains(&(0, 2)));
        assert_eq!(cache.get(&(0, 2)).unwrap().path, Vec::<usize>::new());
        assert_eq!(cache.best_over([(0, 2), (0, 4)]), Some((0, 4)));

        cache.tombstone((0, 4));
        cache.tombstone((3, 2));
        cache.tombstone((3, 4));
        assert_eq!(cache.best_over([(0, 2), (0, 4), (3, 2), (3, 4)]), None);
    }

    #[test]
    fn test_extend_adds_pairs_through_intermediate() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let mut cache = DistanceCache::initialize(&oracle, &[0, 3], &[2, 4]).unwrap();

        let added = cache.extend(&oracle, 1, &[0, 3], &[2, 4]).unwrap();
        // (0,1), (3,1), (1,2), (1,4) and the (1,1) tombstone
        assert_eq!(added, 5);
        assert_eq!(cache.distance(&(3, 1)), Some(OrderedFloat(2.0)));
        assert_eq!(cache.get(&(1, 4)).unwrap().path, vec![1, 4]);
        assert_eq!(cache.get(&(1, 1)), Some(&Route::unreachable()));
        assert_eq!(cache.best_over([(1, 1)]), None);
    }

    #[test]
    fn test_extend_does_not_revive_tombstones() {
        let graph = bow_tie();
        let oracle: NetworkOracle<'_, W, DirectedGraph<W>> = NetworkOracle::new(&graph);
        let mut cache = DistanceCache::initialize(&oracle, &[0], &[2]).unwrap();

        cache.extend(&oracle, 1, &[0], &[2]).unwrap();
        cache.tombstone((0, 1));
        let added = cache.extend(&oracle, 1, &[0], &[2]).unwrap();

        assert_eq!(added, 0);
        assert_eq!(cache.get(&(0, 1)), Some(&Route::unreachable()));
    }
}
