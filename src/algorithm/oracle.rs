use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::rc::Rc;

use log::trace;
use num_traits::{Float, Zero};

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::{PathOracle, Route, ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::{Error, Result};

/// Graph-backed [`PathOracle`].
///
/// The graph never changes while the oracle borrows it, so every single-source
/// shortest-path tree and every reverse reachability set is computed at most once.
#[derive(Debug)]
pub struct NetworkOracle<'g, W, G, A = Dijkstra>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    graph: &'g G,
    algorithm: A,
    trees: RefCell<HashMap<usize, Rc<ShortestPathResult<W>>>>,
    ancestors: RefCell<HashMap<usize, Rc<Vec<bool>>>>,
}

impl<'g, W, G> NetworkOracle<'g, W, G, Dijkstra>
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    /// Creates an oracle answering queries with Dijkstra's algorithm
    pub fn new(graph: &'g G) -> Self {
        Self::with_algorithm(graph, Dijkstra::new())
    }
}

impl<'g, W, G, A> NetworkOracle<'g, W, G, A>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    /// Creates an oracle backed by a specific shortest path algorithm
    pub fn with_algorithm(graph: &'g G, algorithm: A) -> Self {
        NetworkOracle {
            graph,
            algorithm,
            trees: RefCell::new(HashMap::new()),
            ancestors: RefCell::new(HashMap::new()),
        }
    }

    /// Number of single-source trees computed so far
    pub fn cached_trees(&self) -> usize {
        self.trees.borrow().len()
    }

    fn tree(&self, source: usize) -> Result<Rc<ShortestPathResult<W>>> {
        if let Some(tree) = self.trees.borrow().get(&source) {
            return Ok(Rc::clone(tree));
        }
        trace!("Computing {} tree from vertex {}", self.algorithm.name(), source);
        let tree = Rc::new(self.algorithm.compute_shortest_paths(self.graph, source)?);
        self.trees.borrow_mut().insert(source, Rc::clone(&tree));
        Ok(tree)
    }

    /// Marks every vertex that can reach `target` (including `target` itself)
    fn ancestors_of(&self, target: usize) -> Rc<Vec<bool>> {
        if let Some(marks) = self.ancestors.borrow().get(&target) {
            return Rc::clone(marks);
        }

        let mut marks = vec![false; self.graph.vertex_count()];
        let mut queue = VecDeque::new();
        if self.graph.has_vertex(target) {
            marks[target] = true;
            queue.push_back(target);
        }
        while let Some(v) = queue.pop_front() {
            for (u, _) in self.graph.incoming_edges(v) {
                if !marks[u] {
                    marks[u] = true;
                    queue.push_back(u);
                }
            }
        }

        let marks = Rc::new(marks);
        self.ancestors.borrow_mut().insert(target, Rc::clone(&marks));
        marks
    }
}

impl<'g, W, G, A> PathOracle<W> for NetworkOracle<'g, W, G, A>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    fn has_path(&self, from: usize, to: usize) -> bool {
        if !self.graph.has_vertex(from) || !self.graph.has_vertex(to) {
            return false;
        }
        self.ancestors_of(to)[from]
    }

    fn shortest_path(&self, from: usize, to: usize) -> Result<Route<W>> {
        if !self.graph.has_vertex(to) {
            return Err(Error::InvalidVertex(to));
        }
        let tree = self.tree(from)?;
        let route = match tree.distances[to] {
            Some(distance) => match self.algorithm.get_path(&tree, to) {
                Some(path) => Route { distance, path },
                None => Route::unreachable(),
            },
            None => Route::unreachable(),
        };
        Ok(route)
    }

    fn reaches_any(&self, candidates: &[usize], to: usize) -> bool {
        if !self.graph.has_vertex(to) {
            return false;
        }
        let marks = self.ancestors_of(to);
        candidates.iter().any(|&from| marks.get(from).copied().unwrap_or(false))
    }
}
