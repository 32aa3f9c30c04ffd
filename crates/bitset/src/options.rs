use util::{DEFAULT_MAX_ELEMENT, MAX_ELEMENT, checked_word_index, element};

use crate::{Error, Result};

/// Per-set configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// The largest element [BitSet::add](crate::BitSet::add) will accept. Values above
    /// [MAX_ELEMENT] behave like [MAX_ELEMENT].
    pub max_element: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_element: DEFAULT_MAX_ELEMENT,
        }
    }
}

impl Options {
    /// Accept every element of the domain. A single large element will allocate all the words
    /// below it.
    pub fn unbounded() -> Self {
        Self {
            max_element: MAX_ELEMENT,
        }
    }

    pub fn with_max_element(mut self, max_element: u64) -> Self {
        self.max_element = max_element.min(MAX_ELEMENT);
        self
    }

    /// Convert `n` into an element, checking it against the domain and the growth ceiling.
    pub fn admit(&self, n: impl TryInto<u64>) -> Result<u64> {
        let n = element(n).ok_or(Error::Unrepresentable)?;
        if n > self.max_element {
            return Err(Error::AboveLimit {
                element: n,
                limit: self.max_element,
            });
        }
        checked_word_index(n).ok_or(Error::Unrepresentable)?;
        Ok(n)
    }
}
