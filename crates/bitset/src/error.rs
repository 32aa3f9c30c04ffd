use thiserror::Error;

/// Why an element was not admitted into a set.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("element is negative or outside the addressable domain")]
    Unrepresentable,

    #[error("element {element} exceeds the configured maximum of {limit}")]
    AboveLimit { element: u64, limit: u64 },

    #[error("failed to allocate storage for {words} words")]
    Allocation { words: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
