//! BowTieBuilder - greedy pathway reconstruction on weighted directed graphs
//!
//! Given an interaction network and two designated node sets (sources and targets),
//! this library grows a connecting subnetwork by repeatedly absorbing the cheapest
//! shortest path between the part of the pathway already built and the endpoints
//! that are still waiting to be connected.
//!
//! The graph is immutable once built; shortest paths are answered by Dijkstra's
//! algorithm behind the narrow [`PathOracle`] interface.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod io;
pub mod pathway;
pub mod report;

use std::path::PathBuf;

use ordered_float::OrderedFloat;

pub use algorithm::{
    dijkstra::Dijkstra, oracle::NetworkOracle, PathOracle, Route, ShortestPathAlgorithm,
    ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::{directed::DirectedGraph, network::InteractionNetwork};
pub use pathway::{BowTieBuilder, BuilderConfig, HaltReason, Pathway, Reconstruction, Step};

/// Concrete weight type used by the file formats and the command line tool
pub type Weight = OrderedFloat<f64>;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(f64),

    #[error("Edge weight is not a finite number: {0}")]
    NonFiniteWeight(f64),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("{kind} file {} does not exist", path.display())]
    MissingInput { kind: &'static str, path: PathBuf },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
