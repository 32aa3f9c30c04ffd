/// Build a [BitSet](crate::BitSet) from a list of elements. Negative elements are ignored.
#[macro_export]
macro_rules! bitset {
    () => {
        $crate::BitSet::new()
    };
    ($($n:expr),+ $(,)?) => {
        $crate::BitSet::from_elements([$($n),+])
    };
}
