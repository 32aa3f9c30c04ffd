use std::{
    iter::{Enumerate, FusedIterator},
    slice,
};

use util::{SHIFT, Word};

/// Ascending iterator over the elements of a [BitSet](crate::BitSet).
#[derive(Clone)]
pub struct Iter<'a> {
    words: Enumerate<slice::Iter<'a, Word>>,
    word: Word,
    base: u64,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(words: &'a [Word], len: usize) -> Self {
        Self {
            words: words.iter().enumerate(),
            word: 0,
            base: 0,
            remaining: len,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.word != 0 {
                // Take the lowest set bit, then clear it.
                let bit = self.word.trailing_zeros();
                self.word &= self.word - 1;
                self.remaining -= 1;
                return Some(self.base + u64::from(bit));
            }
            let (index, word) = self.words.next()?;
            self.word = *word;
            self.base = (index as u64) << SHIFT;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
