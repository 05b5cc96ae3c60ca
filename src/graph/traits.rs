use std::fmt::Debug;
use num_traits::{Float, Zero};

/// Trait representing a weighted directed graph
pub trait Graph<W>: Debug 
where
    W: Float + Zero + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;
    
    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;
    
    /// Returns an iterator over the outgoing edges from a vertex, in insertion order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;
    
    /// Returns an iterator over the incoming edges to a vertex, in insertion order
    fn incoming_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;
    
    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool;
    
    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool;
    
    /// Gets the weight of an edge if it exists
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W>;
}

/// Trait for the operations used while a graph is being built
pub trait MutableGraph<W>: Graph<W> 
where
    W: Float + Zero + Debug + Copy,
{
    /// Adds a vertex to the graph and returns its ID
    fn add_vertex(&mut self) -> usize;
    
    /// Adds a directed edge between vertices with the given weight.
    /// An existing edge keeps its position and takes the new weight.
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> bool;
}
