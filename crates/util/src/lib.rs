//! Word arithmetic shared by the `wordset` collections.
//!
//! Every element of a set is a non-negative integer that is mapped to a `(word, bit)` coordinate
//! with a shift and a mask. Nothing in here allocates or holds state.
pub mod word;

pub use word::{
    DEFAULT_MAX_ELEMENT, MAX_ELEMENT, MASK, SHIFT, WORD_BITS, Word, bit_mask, checked_word_index,
    element, popcount, word_index, words_for,
};
