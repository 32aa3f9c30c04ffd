/// The storage unit of a bitset.
pub type Word = u64;

/// Number of bits in a [Word].
pub const WORD_BITS: u32 = Word::BITS;

/// `log2(WORD_BITS)`, the shift that turns an element into its word index.
pub const SHIFT: u32 = WORD_BITS.trailing_zeros();

/// Mask selecting the bit position of an element within its word.
pub const MASK: u64 = (WORD_BITS as u64) - 1;

/// The largest element any set can hold. The domain is `[0, 2^63 - 1)`.
pub const MAX_ELEMENT: u64 = (i64::MAX as u64) - 1;

/// The default growth ceiling: 2^32 elements, or 512 MiB of words.
pub const DEFAULT_MAX_ELEMENT: u64 = u32::MAX as u64;

const _: () = assert!(WORD_BITS.is_power_of_two());

/// Convert an integer into the element domain. Returns `None` for negative values and for values
/// above [MAX_ELEMENT].
#[inline]
pub fn element(n: impl TryInto<u64>) -> Option<u64> {
    let Ok(n) = <_ as TryInto<u64>>::try_into(n) else {
        return None;
    };
    (n <= MAX_ELEMENT).then_some(n)
}

/// Index of the word holding `n`.
///
/// The caller guarantees `n <= MAX_ELEMENT` and that the index fits a `usize`; see
/// [checked_word_index] when that is not known.
#[inline]
pub const fn word_index(n: u64) -> usize {
    (n >> SHIFT) as usize
}

/// Index of the word holding `n`, or `None` if it cannot be addressed on this target.
#[inline]
pub fn checked_word_index(n: u64) -> Option<usize> {
    if n > MAX_ELEMENT {
        return None;
    }
    usize::try_from(n >> SHIFT).ok()
}

/// Single-bit mask locating `n` within its word.
#[inline]
pub const fn bit_mask(n: u64) -> Word {
    1 << (n & MASK)
}

/// Number of set bits in `word`.
#[inline]
pub const fn popcount(word: Word) -> u32 {
    word.count_ones()
}

/// Number of words needed to store element `n`.
#[inline]
pub const fn words_for(n: u64) -> usize {
    word_index(n) + 1
}
