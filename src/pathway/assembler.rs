use std::collections::HashMap;
use std::fmt::Debug;

use num_traits::{Float, Zero};

use crate::data_structures::OrderedSet;
use crate::graph::InteractionNetwork;
use crate::{Error, Result};

/// Accumulates absorbed paths into the output subgraph.
///
/// Nodes keep the order in which they entered the pathway and each node keeps its
/// successors in insertion order, which fixes the order edges are reported in.
#[derive(Debug, Clone, Default)]
pub struct PathwayAssembler {
    nodes: Vec<usize>,
    slots: HashMap<usize, usize>,
    successors: Vec<OrderedSet<usize>>,
}

impl PathwayAssembler {
    /// Starts a pathway containing the given vertices (sources, then targets)
    pub fn new<I>(initial: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut assembler = PathwayAssembler::default();
        for v in initial {
            assembler.add_node(v);
        }
        assembler
    }

    fn add_node(&mut self, vertex: usize) -> usize {
        if let Some(&slot) = self.slots.get(&vertex) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(vertex);
        self.successors.push(OrderedSet::new());
        self.slots.insert(vertex, slot);
        slot
    }

    /// Adds every node of `path` and an edge for each consecutive pair.
    /// Edges already present are skipped; returns the number of new edges.
    pub fn add_path(&mut self, path: &[usize]) -> usize {
        for &v in path {
            self.add_node(v);
        }
        path.windows(2)
            .filter(|pair| {
                let slot = self.slots[&pair[0]];
                self.successors[slot].insert(pair[1])
            })
            .count()
    }

    pub fn finalize(self) -> Pathway {
        let edges = self
            .nodes
            .iter()
            .zip(&self.successors)
            .flat_map(|(&from, successors)| successors.iter().map(move |to| (from, to)))
            .collect();
        Pathway {
            nodes: self.nodes,
            edges,
        }
    }
}

/// The reconstructed subnetwork, in vertex ids of the input graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pathway {
    nodes: Vec<usize>,
    edges: Vec<(usize, usize)>,
}

impl Pathway {
    /// Nodes in the order they entered the pathway
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Edges grouped by tail node (in node order), heads in insertion order
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, vertex: usize) -> bool {
        self.nodes.contains(&vertex)
    }

    pub fn contains_edge(&self, from: usize, to: usize) -> bool {
        self.edges.contains(&(from, to))
    }

    /// Nodes without any incident pathway edge
    pub fn isolated_nodes(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .copied()
            .filter(|&v| !self.edges.iter().any(|&(a, b)| a == v || b == v))
            .collect()
    }

    /// Edges translated to the network's node identifiers
    pub fn labelled_edges<W>(&self, network: &InteractionNetwork<W>) -> Result<Vec<(String, String)>>
    where
        W: Float + Zero + Debug + Copy,
    {
        self.edges
            .iter()
            .map(|&(from, to)| -> Result<(String, String)> {
                let label = |v: usize| {
                    network
                        .label(v)
                        .map(str::to_string)
                        .ok_or(Error::InvalidVertex(v))
                };
                Ok((label(from)?, label(to)?))
            })
            .collect()
    }
}
