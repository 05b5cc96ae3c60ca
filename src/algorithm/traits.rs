use std::collections::HashSet;
use std::fmt::Debug;

use log::warn;
use num_traits::{Float, Zero};

use crate::graph::Graph;
use crate::Result;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if target >= result.predecessors.len() || result.distances[target].is_none() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        let mut visited = HashSet::new();

        // Build path in reverse order
        while current != result.source {
            if !visited.insert(current) {
                warn!("Cycle detected in path reconstruction at vertex {}", current);
                return None;
            }

            path.push(current);
            match result.predecessors[current] {
                Some(pred) => current = pred,
                // A reached vertex other than the source always has a predecessor
                None => return None,
            }
        }

        path.push(result.source);
        path.reverse();

        Some(path)
    }
}

/// A shortest route between two vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Route<W> {
    /// Total cost, `W::infinity()` when the target is unreachable
    pub distance: W,
    /// Vertices from the start to the end of the route, empty when unreachable
    pub path: Vec<usize>,
}

impl<W> Route<W>
where
    W: Float,
{
    /// The route of an unreachable (or tombstoned) pair
    pub fn unreachable() -> Self {
        Route {
            distance: W::infinity(),
            path: Vec::new(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Narrow shortest-path interface the pathway builder is written against.
///
/// Implementations must be deterministic: repeated queries on the same graph return
/// the same route, including the choice among equal-cost paths.
pub trait PathOracle<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Number of vertices; vertex ids are `0..vertex_count()`
    fn vertex_count(&self) -> usize;

    /// Returns true if `to` is reachable from `from`
    fn has_path(&self, from: usize, to: usize) -> bool;

    /// Shortest route from `from` to `to`; `Route::unreachable()` if there is none
    fn shortest_path(&self, from: usize, to: usize) -> Result<Route<W>>;

    /// Returns true if any of `candidates` reaches `to`
    fn reaches_any(&self, candidates: &[usize], to: usize) -> bool {
        candidates.iter().any(|&from| self.has_path(from, to))
    }
}
