//! Aho-Corasick automaton stored in a double-array trie.
//!
//! Construction runs leaves-first through these modules:
//!
//! - `codec`: dense integer codes for every dictionary code point
//! - `trie`: arena-backed keyword trie with per-state emits
//! - `packer`: places the trie into the `base`/`check` double array
//! - `failure`: breadth-first failure links and merged outputs
//! - `double_array`: the immutable result used by every query

mod codec;
mod double_array;
mod failure;
mod packer;
mod trie;

pub use codec::SymbolCodec;
pub use double_array::{DoubleArray, ROOT_STATE};
pub use packer::DEFAULT_INITIAL_CAPACITY;

pub(crate) use failure::construct_failure_states;
pub(crate) use packer::DoubleArrayPacker;
pub(crate) use trie::KeywordTrie;

#[cfg(test)]
mod tests;
