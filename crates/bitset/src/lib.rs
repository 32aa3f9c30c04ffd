//! A growable set of non-negative integers packed into 64-bit words.
//!
//! ## Usage
//!
//! ```
//! use wordset::{BitSet, bitset};
//!
//! let mut set = bitset![1, 2, 10, 99];
//! set.add(65).clear(2);
//! assert!(set.contains(65));
//! assert!(!set.contains(64));
//!
//! let other = BitSet::from_elements([1, 3, 65]);
//! assert_eq!(set.intersect(&other).iter().collect::<Vec<_>>(), vec![1, 65]);
//!
//! // Negative elements are never stored.
//! set.add(-4);
//! assert_eq!(set.len(), 4);
//! ```
//!
//! Storage grows on demand up to the ceiling configured in [Options], which defaults to
//! [DEFAULT_MAX_ELEMENT]. Use [BitSet::try_add] to learn why an element was rejected or could not
//! be stored.
mod bitset;
mod error;
mod iter;
mod macros;
mod ops;
mod options;
pub mod set;

pub use bitset::BitSet;
pub use error::{Error, Result};
pub use iter::Iter;
pub use options::Options;
pub use set::{HashIntSet, IntSet};
pub use util::{DEFAULT_MAX_ELEMENT, MAX_ELEMENT, WORD_BITS};
