use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::algorithm::PathOracle;
use crate::data_structures::OrderedSet;

/// Tracks how far each vertex has progressed into the pathway.
///
/// * `not_visited`: sources and targets still waiting to be connected, sources first
/// * `visited`: every absorbed vertex, in absorption order
/// * `remaining`: every graph vertex not yet absorbed
#[derive(Debug, Clone)]
pub struct Partition {
    not_visited: OrderedSet<usize>,
    visited: OrderedSet<usize>,
    remaining: OrderedSet<usize>,
}

impl Partition {
    pub fn new(vertex_count: usize, sources: &[usize], targets: &[usize]) -> Self {
        Partition {
            not_visited: sources.iter().chain(targets).copied().collect(),
            visited: OrderedSet::new(),
            remaining: (0..vertex_count).collect(),
        }
    }

    pub fn not_visited(&self) -> &OrderedSet<usize> {
        &self.not_visited
    }

    pub fn visited(&self) -> &OrderedSet<usize> {
        &self.visited
    }

    pub fn remaining(&self) -> &OrderedSet<usize> {
        &self.remaining
    }

    /// True while some not-yet-absorbed vertex outside `not_visited` can still reach
    /// at least one `not_visited` vertex. False means the build can make no progress.
    pub fn feasible<W, O>(&self, oracle: &O) -> bool
    where
        W: Float + Zero + Debug + Copy,
        O: PathOracle<W>,
    {
        let candidates: Vec<usize> = self
            .remaining
            .iter()
            .filter(|v| !self.not_visited.contains(v))
            .collect();
        if candidates.is_empty() {
            return false;
        }
        self.not_visited
            .iter()
            .any(|n| oracle.reaches_any(&candidates, n))
    }

    /// Moves every vertex of `path` to `visited` and out of `remaining`, and marks
    /// both endpoints as connected
    pub fn absorb(&mut self, path: &[usize]) {
        for &v in path {
            self.visited.insert(v);
            self.remaining.remove(&v);
        }
        if let (Some(first), Some(last)) = (path.first(), path.last()) {
            self.not_visited.remove(first);
            self.not_visited.remove(last);
        }
    }
}
