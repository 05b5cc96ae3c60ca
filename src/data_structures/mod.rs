pub mod ordered_set;
pub mod priority_queue;

pub use ordered_set::OrderedSet;
pub use priority_queue::BinaryHeapWrapper;
