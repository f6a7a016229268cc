//! acdat: multi-keyword search with an Aho-Corasick automaton packed into a
//! double-array trie.
//!
//! Build once from a sorted dictionary of keywords and payloads, then scan
//! any number of texts in a single left-to-right pass each:
//!
//! ```
//! use std::collections::BTreeMap;
//! use acdat::AhoCorasickDoubleArrayTrie;
//!
//! let mut dict = BTreeMap::new();
//! for word in ["hers", "his", "she", "he"] {
//!     dict.insert(word.to_string(), word.len());
//! }
//! let acdat = AhoCorasickDoubleArrayTrie::build(dict).unwrap();
//!
//! let found: Vec<String> = acdat
//!     .find_all("ushers")
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(found, ["[1:4]=3", "[2:4]=2", "[2:6]=4"]);
//!
//! assert_eq!(acdat.get("his"), Some(&3));
//! assert_eq!(acdat.get("hi"), None);
//! ```
//!
//! Offsets are counted in `char`s, not bytes. A built automaton is immutable
//! and can be shared across threads for concurrent scans.

pub mod automaton;
mod builder;
mod hit;
mod matcher;

pub use automaton::DEFAULT_INITIAL_CAPACITY;
pub use builder::Builder;
pub use hit::Hit;
pub use matcher::{AhoCorasickDoubleArrayTrie, FindIter};

use thiserror::Error;

/// Result type alias using [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building an automaton.
///
/// Queries never fail; only construction does.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Keywords were not supplied in ascending code-point order.
    #[error("keywords are not sorted: siblings out of order at depth {depth}")]
    Unsorted { depth: usize },

    /// A zero-length keyword was supplied.
    #[error("keyword #{index} is empty")]
    EmptyKeyword { index: usize },

    /// The same keyword was supplied more than once.
    #[error("keyword #{index} duplicates an earlier keyword")]
    DuplicateKeyword { index: usize },

    /// The dictionary does not fit the 32-bit cell encoding.
    #[error("dictionary is too large for the double-array encoding")]
    TooLarge,
}

impl Error {
    /// Negative status code for callers that expect one.
    pub fn code(&self) -> i32 {
        match self {
            Error::TooLarge => -1,
            Error::EmptyKeyword { .. } => -2,
            Error::Unsorted { .. } => -3,
            Error::DuplicateKeyword { .. } => -4,
        }
    }
}
