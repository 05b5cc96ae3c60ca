//! Greedy pathway growth between source and target node sets.

pub mod assembler;
pub mod builder;
pub mod distance_cache;
pub mod partition;
pub mod selector;

pub use assembler::{Pathway, PathwayAssembler};
pub use builder::{reconstruct, BowTieBuilder, BuilderConfig, HaltReason, Reconstruction, Step};
pub use distance_cache::{DistanceCache, PairKey};
pub use partition::Partition;
pub use selector::{PathSelector, Phase, Selection};
