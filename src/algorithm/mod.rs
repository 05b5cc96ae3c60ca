pub mod traits;
pub mod dijkstra;
pub mod oracle;

pub use traits::{PathOracle, Route, ShortestPathAlgorithm, ShortestPathResult};
