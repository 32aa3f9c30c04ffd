use std::{
    fmt,
    hash::{Hash, Hasher},
};

use tracing::{debug, trace};
use util::{SHIFT, Word, bit_mask, checked_word_index, element, popcount, word_index};

use crate::{Error, Iter, Options, Result};

/// A growable set of non-negative integers, one bit per element.
///
/// Word `i` holds the elements `[64 * i, 64 * (i + 1))`. The last word is never zero and the
/// cached length always matches the number of set bits.
#[derive(Clone)]
pub struct BitSet {
    words: Vec<Word>,
    count: usize,
    options: Options,
}

impl BitSet {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            words: Vec::new(),
            count: 0,
            options,
        }
    }

    /// Create an empty set with storage reserved for the elements `[0, capacity)`.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut set = Self::new();
        set.words.reserve_exact(capacity.div_ceil(util::WORD_BITS as usize));
        set
    }

    /// Create a set holding `elements`. Elements that are negative, above the default ceiling, or
    /// that cannot be allocated are ignored.
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: TryInto<u64>,
    {
        Self::from_elements_with(Options::default(), elements)
    }

    pub fn from_elements_with<I>(options: Options, elements: I) -> Self
    where
        I: IntoIterator,
        I::Item: TryInto<u64>,
    {
        let mut set = Self::with_options(options);
        for n in elements {
            if let Err(error) = set.try_add(n) {
                debug!(%error, "ignoring element");
            }
        }
        set
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// The backing words, lowest elements first. The last word is never zero.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// The number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn contains(&self, n: impl TryInto<u64>) -> bool {
        let Some((index, mask)) = locate(n) else {
            return false;
        };
        self.words.get(index).is_some_and(|word| *word & mask != 0)
    }

    /// Insert `n`, growing the storage if needed. Rejected elements are ignored, see
    /// [BitSet::try_add].
    pub fn add(&mut self, n: impl TryInto<u64>) -> &mut Self {
        if let Err(error) = self.try_add(n) {
            debug!(%error, "ignoring element");
        }
        self
    }

    /// Insert `n`, returning whether it was not already present. Fails without touching the set
    /// when `n` is rejected or its storage cannot be allocated.
    pub fn try_add(&mut self, n: impl TryInto<u64>) -> Result<bool> {
        let n = self.options.admit(n)?;
        let index = word_index(n);
        if index >= self.words.len() {
            let len = index.checked_add(1).ok_or(Error::Unrepresentable)?;
            self.grow(len)?;
        }

        // Safety: this can never be out of bounds given the grow above.
        let word = unsafe { self.words.get_unchecked_mut(index) };
        let mask = bit_mask(n);
        if *word & mask != 0 {
            return Ok(false);
        }
        *word |= mask;
        self.count += 1;
        Ok(true)
    }

    /// Remove `n` if present.
    pub fn clear(&mut self, n: impl TryInto<u64>) -> &mut Self {
        self.remove(n);
        self
    }

    /// Remove `n`, returning whether it was present.
    pub fn remove(&mut self, n: impl TryInto<u64>) -> bool {
        let Some((index, mask)) = locate(n) else {
            return false;
        };
        let Some(word) = self.words.get_mut(index) else {
            return false;
        };
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        self.count -= 1;
        self.trim();
        true
    }

    /// Remove every element and release the words.
    pub fn reset(&mut self) {
        self.words.clear();
        self.count = 0;
    }

    /// The smallest element.
    pub fn min(&self) -> Option<u64> {
        let (index, word) = self
            .words
            .iter()
            .enumerate()
            .find(|(_, word)| **word != 0)?;
        Some(base(index) + u64::from(word.trailing_zeros()))
    }

    /// The largest element.
    pub fn max(&self) -> Option<u64> {
        let word = self.words.last()?;
        let top = Word::BITS - 1 - word.leading_zeros();
        Some(base(self.words.len() - 1) + u64::from(top))
    }

    /// Elements of both sets.
    pub fn intersect(&self, other: &Self) -> Self {
        let words = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| a & b)
            .collect();
        self.derive(words)
    }

    /// Elements of either set.
    pub fn union(&self, other: &Self) -> Self {
        let (long, short) = if self.words.len() >= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        let mut words = long.clone();
        for (word, other) in words.iter_mut().zip(short) {
            *word |= other;
        }
        self.derive(words)
    }

    /// Elements of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let mut words = self.words.clone();
        for (word, other) in words.iter_mut().zip(&other.words) {
            *word &= !other;
        }
        self.derive(words)
    }

    /// Elements of exactly one of the two sets.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let (long, short) = if self.words.len() >= other.words.len() {
            (&self.words, &other.words)
        } else {
            (&other.words, &self.words)
        };
        let mut words = long.clone();
        for (word, other) in words.iter_mut().zip(short) {
            *word ^= other;
        }
        self.derive(words)
    }

    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word |= other;
        }
        self.count = compute_len(&self.words);
    }

    pub fn intersect_with(&mut self, other: &Self) {
        self.words.truncate(other.words.len());
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word &= other;
        }
        self.trim();
        self.count = compute_len(&self.words);
    }

    pub fn difference_with(&mut self, other: &Self) {
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word &= !other;
        }
        self.trim();
        self.count = compute_len(&self.words);
    }

    pub fn symmetric_difference_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            *word ^= other;
        }
        self.trim();
        self.count = compute_len(&self.words);
    }

    /// Whether every element of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        // Trimmed storage: a longer set has an element beyond the other's last word.
        self.words.len() <= other.words.len()
            && self
                .words
                .iter()
                .zip(&other.words)
                .all(|(a, b)| a & !b == 0)
    }

    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & b == 0)
    }

    /// Call `visitor` with every element in ascending order until it returns `true`. Returns
    /// whether the traversal was stopped early.
    pub fn visit(&self, mut visitor: impl FnMut(u64) -> bool) -> bool {
        for (index, word) in self.words.iter().enumerate() {
            let mut word = *word;
            while word != 0 {
                let bit = word.trailing_zeros();
                if visitor(base(index) + u64::from(bit)) {
                    return true;
                }
                word &= word - 1;
            }
        }
        false
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.words, self.count)
    }

    fn grow(&mut self, len: usize) -> Result<()> {
        trace!(from = self.words.len(), to = len, "growing storage");
        self.words
            .try_reserve(len - self.words.len())
            .map_err(|_| Error::Allocation { words: len })?;
        self.words.resize(len, 0);
        Ok(())
    }

    fn trim(&mut self) {
        let len = self
            .words
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |index| index + 1);
        if len < self.words.len() {
            trace!(from = self.words.len(), to = len, "trimming storage");
            self.words.truncate(len);
        }
    }

    fn derive(&self, words: Vec<Word>) -> Self {
        let mut set = Self {
            count: compute_len(&words),
            words,
            options: self.options,
        };
        set.trim();
        set
    }
}

/// The `(word index, mask)` coordinate of `n`, or `None` if `n` is not an element.
#[inline]
fn locate(n: impl TryInto<u64>) -> Option<(usize, Word)> {
    let n = element(n)?;
    let index = checked_word_index(n)?;
    Some((index, bit_mask(n)))
}

/// The first element stored in word `index`.
#[inline]
fn base(index: usize) -> u64 {
    (index as u64) << SHIFT
}

/// Number of set bits across `words`.
fn compute_len(words: &[Word]) -> usize {
    words
        .iter()
        .filter(|word| **word != 0)
        .map(|word| popcount(*word) as usize)
        .sum()
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for BitSet {}

impl Hash for BitSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for BitSet
where
    T: TryInto<u64>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_elements(iter)
    }
}

impl<T> Extend<T> for BitSet
where
    T: TryInto<u64>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for n in iter {
            self.add(n);
        }
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = u64;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{BitSet, compute_len};
    use crate::{DEFAULT_MAX_ELEMENT, Error, MAX_ELEMENT, Options};

    fn members(set: &BitSet) -> Vec<u64> {
        set.iter().collect()
    }

    fn assert_invariants(set: &BitSet) {
        assert_ne!(set.words().last(), Some(&0), "trailing zero word");
        assert_eq!(set.len(), compute_len(set.words()));
    }

    #[test]
    fn empty() {
        let set = BitSet::from_elements(Vec::<i64>::new());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.words().is_empty());
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
        assert_eq!(set, BitSet::new());
    }

    #[test]
    fn construction() {
        let set = BitSet::from_elements([1, 2, 10, 99, 2, -7]);
        assert_eq!(set.len(), 4);
        assert_eq!(set.words().len(), 2);
        for n in [1, 2, 10, 99] {
            assert!(set.contains(n));
        }
        assert!(!set.contains(-7));
        assert!(!set.contains(3));
        assert_invariants(&set);
    }

    #[test]
    fn negative_only() {
        let set = BitSet::from_elements([-1, -2, i64::MIN]);
        assert!(set.is_empty());
        assert!(set.words().is_empty());
    }

    #[test]
    fn word_boundary() {
        let set = crate::bitset![65];
        assert!(set.contains(65));
        assert!(!set.contains(64));
        assert!(!set.contains(66));
        assert!(!set.contains(1));
        assert_eq!(set.words(), &[0, 2]);
    }

    #[test]
    fn contains_out_of_range() {
        let set = crate::bitset![3];
        assert!(!set.contains(64));
        assert!(!set.contains(1u64 << 40));
        assert!(!set.contains(u64::MAX));
        assert!(!set.contains(-3));
    }

    #[test]
    fn add_grows() {
        let mut set = BitSet::new();
        set.add(0).add(200).add(64);
        assert_eq!(set.words().len(), 4);
        assert_eq!(members(&set), vec![0, 64, 200]);
        assert_eq!(set.len(), 3);
        assert_invariants(&set);
    }

    #[test]
    fn add_is_idempotent() {
        let mut set = BitSet::new();
        set.add(42);
        let once = set.clone();
        set.add(42);
        assert_eq!(set, once);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_rejects() {
        let mut set = BitSet::with_options(Options::default().with_max_element(1000));
        set.add(-1).add(1001).add(u64::MAX);
        assert!(set.is_empty());
        assert!(set.words().is_empty());

        assert_eq!(set.try_add(-1), Err(Error::Unrepresentable));
        assert_eq!(
            set.try_add(5000),
            Err(Error::AboveLimit {
                element: 5000,
                limit: 1000
            })
        );
        assert_eq!(set.try_add(1000), Ok(true));
        assert_eq!(set.try_add(1000), Ok(false));
    }

    #[test]
    fn unbounded() {
        let mut set = BitSet::with_options(Options::unbounded());
        assert_eq!(set.try_add(MAX_ELEMENT + 1), Err(Error::Unrepresentable));
        assert!(set.is_empty());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn unallocatable_element() {
        let mut set = BitSet::with_options(Options::unbounded());
        assert!(matches!(
            set.try_add(MAX_ELEMENT),
            Err(Error::Allocation { .. })
        ));
        assert!(set.is_empty());
        assert!(set.words().is_empty());

        set.add(MAX_ELEMENT).add(3);
        assert_eq!(members(&set), vec![3]);
        assert_invariants(&set);
    }

    #[test]
    fn construction_ignores_above_ceiling() {
        let options = Options::default().with_max_element(100);
        let set = BitSet::from_elements_with(options, [5, 101, 300, -1]);
        assert_eq!(members(&set), vec![5]);
        assert_eq!(set.words().len(), 1);
        assert_eq!(set.options(), options);
        assert_invariants(&set);

        let set = BitSet::from_elements([1u64, DEFAULT_MAX_ELEMENT + 1]);
        assert_eq!(set.len(), 1);
        assert!(!set.contains(DEFAULT_MAX_ELEMENT + 1));
        assert_eq!(set.words().len(), 1);
    }

    #[test]
    fn construction_sizes_storage_to_largest_element() {
        let set = BitSet::from_elements([700, 3, 64, 700]);
        assert_eq!(set.words().len(), 11);
        assert_eq!(set.len(), 3);
        assert_invariants(&set);
    }

    #[test]
    fn clear_round_trip() {
        let mut set = crate::bitset![1, 2, 3];
        set.add(500).clear(500);
        assert!(!set.contains(500));
        assert_eq!(set.len(), 3);
        assert_eq!(set.words().len(), 1);
        assert_invariants(&set);
    }

    #[test]
    fn clear_trims() {
        let mut set = crate::bitset![1, 70, 300];
        assert_eq!(set.words().len(), 5);
        set.clear(300);
        assert_eq!(set.words().len(), 2);
        set.clear(70);
        assert_eq!(set.words().len(), 1);
        set.clear(1);
        assert!(set.words().is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn clear_absent() {
        let mut set = crate::bitset![1, 130];
        set.clear(2).clear(-1).clear(1 << 20);
        assert_eq!(set.len(), 2);
        assert!(!set.remove(5));
        assert!(set.remove(130));
        assert!(!set.remove(130));
        assert_eq!(set.words().len(), 1);
    }

    #[test]
    fn clear_low_word_keeps_storage() {
        let mut set = crate::bitset![1, 130];
        set.clear(1);
        assert_eq!(set.words().len(), 3);
        assert_eq!(members(&set), vec![130]);
    }

    #[test]
    fn reset() {
        let mut set = crate::bitset![1, 2, 900];
        set.reset();
        assert!(set.is_empty());
        assert!(set.words().is_empty());
    }

    #[test]
    fn min_max() {
        let mut set = crate::bitset![70, 3, 191];
        assert_eq!(set.min(), Some(3));
        assert_eq!(set.max(), Some(191));
        set.clear(3);
        assert_eq!(set.min(), Some(70));
        set.add(0).add(63);
        assert_eq!(set.min(), Some(0));
        set.clear(191);
        assert_eq!(set.max(), Some(70));
    }

    #[test]
    fn algebra() {
        let a = crate::bitset![1, 2, 3, 4];
        let b = crate::bitset![1, 3, 4, 5];
        assert_eq!(members(&a.intersect(&b)), vec![1, 3, 4]);
        assert_eq!(members(&a.union(&b)), vec![1, 2, 3, 4, 5]);
        assert_eq!(members(&a.difference(&b)), vec![2]);
        assert_eq!(members(&a.symmetric_difference(&b)), vec![2, 5]);
        assert_eq!(a.intersect(&b).len(), 3);
        assert_eq!(a.union(&b).len(), 5);
        assert_eq!(a.difference(&b).len(), 1);
    }

    #[test]
    fn algebra_is_pure() {
        let a = crate::bitset![1, 2, 3, 4];
        let b = crate::bitset![1, 3, 4, 5];
        let _ = a.intersect(&b);
        let _ = a.union(&b);
        let _ = a.difference(&b);
        assert_eq!(a, crate::bitset![1, 2, 3, 4]);
        assert_eq!(b, crate::bitset![1, 3, 4, 5]);
    }

    #[test]
    fn algebra_trims() {
        let a = crate::bitset![1, 200];
        let b = crate::bitset![1, 300];
        let both = a.intersect(&b);
        assert_eq!(both.words().len(), 1);
        assert_invariants(&both);

        let only = b.difference(&crate::bitset![300]);
        assert_eq!(only.words().len(), 1);
        assert_invariants(&only);

        let xor = a.symmetric_difference(&crate::bitset![200]);
        assert_eq!(xor.words(), &[2]);
    }

    #[test]
    fn algebra_mixed_lengths() {
        let short = crate::bitset![1, 5];
        let long = crate::bitset![5, 64, 1000];
        assert_eq!(members(&short.union(&long)), vec![1, 5, 64, 1000]);
        assert_eq!(members(&long.union(&short)), vec![1, 5, 64, 1000]);
        assert_eq!(members(&short.intersect(&long)), vec![5]);
        assert_eq!(members(&long.difference(&short)), vec![64, 1000]);
        assert_eq!(members(&short.difference(&long)), vec![1]);
    }

    #[test]
    fn identities() {
        let a = crate::bitset![0, 63, 64, 127, 4096];
        assert_eq!(a.intersect(&a), a);
        assert_eq!(a.union(&BitSet::new()), a);
        assert_eq!(BitSet::new().union(&a), a);
        assert!(a.difference(&a).is_empty());
        assert!(a.difference(&a).words().is_empty());
        assert!(a.intersect(&BitSet::new()).is_empty());
    }

    #[test]
    fn in_place() {
        let b = crate::bitset![1, 3, 4, 5, 300];

        let mut a = crate::bitset![1, 2, 3, 4];
        a.union_with(&b);
        assert_eq!(a, crate::bitset![1, 2, 3, 4, 5, 300]);
        assert_invariants(&a);

        let mut a = crate::bitset![1, 2, 3, 4, 700];
        a.intersect_with(&b);
        assert_eq!(a, crate::bitset![1, 3, 4]);
        assert_invariants(&a);

        let mut a = crate::bitset![1, 2, 300];
        a.difference_with(&b);
        assert_eq!(a, crate::bitset![2]);
        assert_invariants(&a);

        let mut a = crate::bitset![1, 2, 300];
        a.symmetric_difference_with(&b);
        assert_eq!(a, crate::bitset![2, 3, 4, 5]);
        assert_invariants(&a);
    }

    #[test]
    fn relations() {
        let small = crate::bitset![1, 3];
        let big = crate::bitset![1, 2, 3, 200];
        let other = crate::bitset![2, 500];
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_superset(&small));
        assert!(BitSet::new().is_subset(&small));
        assert!(small.is_subset(&small));
        assert!(small.is_disjoint(&other));
        assert!(!big.is_disjoint(&other));
        assert!(!other.is_subset(&big));
    }

    #[test]
    fn visit_order() {
        let set = crate::bitset![99, 10, 2, 1];
        let mut visited = vec![];
        let aborted = set.visit(|n| {
            visited.push(n);
            false
        });
        assert!(!aborted);
        assert_eq!(visited, vec![1, 2, 10, 99]);

        // Restartable.
        let mut again = vec![];
        set.visit(|n| {
            again.push(n);
            false
        });
        assert_eq!(again, visited);
    }

    #[test]
    fn visit_abort() {
        let set = crate::bitset![1, 2, 10, 99];
        let mut visited = vec![];
        let aborted = set.visit(|n| {
            visited.push(n);
            n == 10
        });
        assert!(aborted);
        assert_eq!(visited, vec![1, 2, 10]);
        assert!(!BitSet::new().visit(|_| true));
    }

    #[test]
    fn visit_word_edges() {
        let set = crate::bitset![0, 63, 64, 127, 128];
        let mut visited = vec![];
        set.visit(|n| {
            visited.push(n);
            false
        });
        assert_eq!(visited, vec![0, 63, 64, 127, 128]);
    }

    #[test]
    fn collect_and_extend() {
        let mut set: BitSet = [5i32, -1, 9].into_iter().collect();
        assert_eq!(members(&set), vec![5, 9]);
        set.extend([100u8, 5]);
        assert_eq!(members(&set), vec![5, 9, 100]);
        let mut total = 0;
        for n in &set {
            total += n;
        }
        assert_eq!(total, 114);
    }

    #[test]
    fn with_capacity() {
        let set = BitSet::with_capacity(1000);
        assert!(set.words().is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", crate::bitset![3, 1, 65]), "{1, 3, 65}");
        assert_eq!(format!("{:?}", BitSet::new()), "{}");
    }

    #[test]
    fn equality_ignores_options() {
        let a = BitSet::from_elements_with(Options::unbounded(), [4, 8]);
        let b = crate::bitset![4, 8];
        assert_eq!(a, b);
        assert_eq!(a.union(&b).options(), Options::unbounded());
    }
}
