pub mod traits;
pub mod directed;
pub mod network;

pub use traits::{Graph, MutableGraph};
pub use directed::DirectedGraph;
pub use network::InteractionNetwork;
