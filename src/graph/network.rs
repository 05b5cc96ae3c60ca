use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;
use num_traits::{Float, Zero};

use crate::graph::{DirectedGraph, Graph, MutableGraph};
use crate::{Error, Result};

/// An immutable interaction network whose nodes are named by opaque string identifiers.
///
/// Identifiers are interned to dense vertex ids in first-seen order: edge endpoints
/// in the order the edges are given, then any extra nodes. Because adjacency lists
/// keep insertion order too, two networks built from the same input answer every
/// shortest-path query identically.
#[derive(Debug, Clone)]
pub struct InteractionNetwork<W>
where
    W: Float + Zero + Debug + Copy,
{
    graph: DirectedGraph<W>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl<W> InteractionNetwork<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Builds the network from weighted edges, adding `extra_nodes` (typically the
    /// sources and targets) as isolated vertices when no edge mentions them.
    ///
    /// Fails on the first negative or non-finite weight.
    pub fn build<E, N, S>(edges: E, extra_nodes: N) -> Result<Self>
    where
        E: IntoIterator<Item = (S, S, W)>,
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut network = InteractionNetwork {
            graph: DirectedGraph::new(),
            labels: Vec::new(),
            index: HashMap::new(),
        };

        for (from, to, weight) in edges {
            if !weight.is_finite() {
                return Err(Error::NonFiniteWeight(weight.to_f64().unwrap_or(f64::NAN)));
            }
            if weight < W::zero() {
                return Err(Error::NegativeWeight(weight.to_f64().unwrap_or(f64::NAN)));
            }
            let u = network.intern(from.as_ref());
            let v = network.intern(to.as_ref());
            network.graph.add_edge(u, v, weight);
        }

        let edge_vertices = network.labels.len();
        for node in extra_nodes {
            network.intern(node.as_ref());
        }
        debug!(
            "Built network with {} vertices ({} isolated extras) and {} edges",
            network.labels.len(),
            network.labels.len() - edge_vertices,
            network.graph.edge_count()
        );

        Ok(network)
    }

    fn intern(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.graph.add_vertex();
        self.labels.push(name.to_string());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Returns the vertex id of a node identifier, if it is part of the network
    pub fn vertex_id(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Like [`vertex_id`](Self::vertex_id) but fails with [`Error::UnknownNode`]
    pub fn require_vertex(&self, name: &str) -> Result<usize> {
        self.vertex_id(name)
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }

    /// Returns the identifier of a vertex
    pub fn label(&self, vertex: usize) -> Option<&str> {
        self.labels.get(vertex).map(String::as_str)
    }

    /// All node identifiers, indexed by vertex id
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Maps a sequence of vertex ids back to their identifiers
    pub fn labels_of(&self, vertices: &[usize]) -> Result<Vec<String>> {
        vertices
            .iter()
            .map(|&v| {
                self.label(v)
                    .map(str::to_string)
                    .ok_or(Error::InvalidVertex(v))
            })
            .collect()
    }

    /// The underlying dense graph
    pub fn graph(&self) -> &DirectedGraph<W> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the network has a directed edge between the two named nodes
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.vertex_id(from), self.vertex_id(to)) {
            (Some(u), Some(v)) => self.graph.has_edge(u, v),
            _ => false,
        }
    }
}
