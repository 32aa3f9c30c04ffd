//! The set interface shared by [BitSet] and the hash-backed [HashIntSet].
//!
//! A [BitSet] costs one bit per element below its largest element, which is the right trade for
//! dense sets of small integers. A [HashIntSet] costs a hash table slot per element and suits
//! sparse sets with a few very large elements.
use ahash::AHashSet;
use util::element;

use crate::BitSet;

pub trait IntSet {
    fn contains(&self, n: impl TryInto<u64>) -> bool;

    fn add(&mut self, n: impl TryInto<u64>) -> &mut Self;

    fn clear(&mut self, n: impl TryInto<u64>) -> &mut Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `visitor` with every element in ascending order until it returns `true`. Returns
    /// whether the traversal was stopped early. Whether this allocates depends on the set.
    fn visit(&self, visitor: impl FnMut(u64) -> bool) -> bool;
}

impl IntSet for BitSet {
    fn contains(&self, n: impl TryInto<u64>) -> bool {
        BitSet::contains(self, n)
    }

    fn add(&mut self, n: impl TryInto<u64>) -> &mut Self {
        BitSet::add(self, n)
    }

    fn clear(&mut self, n: impl TryInto<u64>) -> &mut Self {
        BitSet::clear(self, n)
    }

    fn len(&self) -> usize {
        BitSet::len(self)
    }

    fn visit(&self, visitor: impl FnMut(u64) -> bool) -> bool {
        BitSet::visit(self, visitor)
    }
}

/// A set of non-negative integers stored in a hash table.
///
/// Accepts the same domain as [BitSet] but has no growth ceiling, since an element only costs
/// its own slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashIntSet {
    inner: AHashSet<u64>,
}

impl HashIntSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: TryInto<u64>,
    {
        let inner = elements.into_iter().filter_map(element).collect();
        Self { inner }
    }

    /// Remove `n`, returning whether it was present.
    pub fn remove(&mut self, n: impl TryInto<u64>) -> bool {
        element(n).is_some_and(|n| self.inner.remove(&n))
    }

    /// The elements in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<u64> {
        let mut elements: Vec<u64> = self.inner.iter().copied().collect();
        elements.sort_unstable();
        elements
    }
}

impl IntSet for HashIntSet {
    fn contains(&self, n: impl TryInto<u64>) -> bool {
        element(n).is_some_and(|n| self.inner.contains(&n))
    }

    fn add(&mut self, n: impl TryInto<u64>) -> &mut Self {
        if let Some(n) = element(n) {
            self.inner.insert(n);
        }
        self
    }

    fn clear(&mut self, n: impl TryInto<u64>) -> &mut Self {
        self.remove(n);
        self
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    /// Visits a sorted snapshot, so every call allocates and sorts a copy of the elements.
    fn visit(&self, visitor: impl FnMut(u64) -> bool) -> bool {
        self.to_sorted_vec().into_iter().any(visitor)
    }
}

impl<T> FromIterator<T> for HashIntSet
where
    T: TryInto<u64>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}
