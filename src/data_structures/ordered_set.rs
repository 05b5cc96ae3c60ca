use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;

/// A set that remembers insertion order.
///
/// Iteration yields elements in the order they were first inserted, and removal
/// keeps the relative order of the remaining elements. Re-inserting a present
/// element does not move it.
#[derive(Debug, Clone)]
pub struct OrderedSet<T>
where
    T: Copy + Eq + Hash + Debug,
{
    inner: IndexSet<T>,
}

impl<T> OrderedSet<T>
where
    T: Copy + Eq + Hash + Debug,
{
    /// Creates a new empty set
    pub fn new() -> Self {
        OrderedSet {
            inner: IndexSet::new(),
        }
    }

    /// Inserts an element at the end; returns false if it was already present
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.insert(value)
    }

    /// Removes an element; returns false if it was not present
    pub fn remove(&mut self, value: &T) -> bool {
        self.inner.shift_remove(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.inner.iter().copied()
    }

    /// The elements in insertion order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }
}

impl<T> Default for OrderedSet<T>
where
    T: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Copy + Eq + Hash + Debug,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        OrderedSet {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for OrderedSet<T>
where
    T: Copy + Eq + Hash + Debug,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}
