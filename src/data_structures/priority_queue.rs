use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// A wrapper around BinaryHeap for priority queue operations in shortest path algorithms.
///
/// Entries are ordered by `(priority, vertex)`, so equal priorities pop in vertex order.
#[derive(Debug)]
pub struct BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: PartialOrd + Copy + Debug + Ord,
{
    /// The underlying binary heap
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: PartialOrd + Copy + Debug + Ord,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::new(),
        }
    }
    
    /// Returns true if the priority queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    
    /// Returns the number of elements in the priority queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    
    /// Pushes an element with the given priority into the priority queue
    pub fn push(&mut self, vertex: V, priority: P) {
        self.heap.push(Reverse((priority, vertex)));
    }
    
    /// Removes the element with the lowest priority value
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, vertex))| (vertex, priority))
    }
}

impl<V, P> Default for BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: PartialOrd + Copy + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_pops_lowest_priority_then_lowest_vertex() {
        let mut queue = BinaryHeapWrapper::new();
        queue.push(4usize, OrderedFloat(2.0));
        queue.push(3usize, OrderedFloat(1.0));
        queue.push(1usize, OrderedFloat(2.0));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some((3, OrderedFloat(1.0))));
        assert_eq!(queue.pop(), Some((1, OrderedFloat(2.0))));
        assert_eq!(queue.pop(), Some((4, OrderedFloat(2.0))));
        assert!(queue.is_empty());
    }
}
