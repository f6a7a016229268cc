//! Automaton construction.

use tracing::debug;

use crate::automaton::{
    construct_failure_states, DoubleArray, DoubleArrayPacker, KeywordTrie, SymbolCodec,
    DEFAULT_INITIAL_CAPACITY,
};
use crate::{AhoCorasickDoubleArrayTrie, Error, Result};

/// Configures and runs construction of an [`AhoCorasickDoubleArrayTrie`].
///
/// ```
/// use acdat::Builder;
///
/// let acdat = Builder::new()
///     .initial_capacity(1024)
///     .build([("apple", 1), ("banana", 2)])
///     .unwrap();
/// assert_eq!(acdat.get("banana"), Some(&2));
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    initial_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }

    /// Starting allocation of the double array, in cells.
    ///
    /// The arrays grow on demand and are trimmed when construction ends, so
    /// this only trades peak memory against reallocation; the resulting
    /// automaton is the same either way.
    pub fn initial_capacity(mut self, cells: usize) -> Self {
        self.initial_capacity = cells;
        self
    }

    /// Build from `(keyword, payload)` pairs.
    ///
    /// Keywords must be non-empty, unique and in ascending order; iterating a
    /// `BTreeMap<String, V>` satisfies all three except emptiness. Pattern ids
    /// are assigned in iteration order starting at 0.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsorted`] if the keywords are out of order,
    /// - [`Error::EmptyKeyword`] / [`Error::DuplicateKeyword`] for bad keywords,
    /// - [`Error::TooLarge`] if the dictionary exceeds the cell encoding.
    pub fn build<I, K, V>(&self, pairs: I) -> Result<AhoCorasickDoubleArrayTrie<V>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let (keys, values): (Vec<Vec<char>>, Vec<V>) = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().chars().collect::<Vec<char>>(), v))
            .unzip();

        if i32::try_from(keys.len()).is_err() {
            return Err(Error::TooLarge);
        }

        let codec = SymbolCodec::new(keys.iter().map(Vec::as_slice));
        let lengths: Vec<u32> = keys.iter().map(|k| k.len() as u32).collect();

        let mut trie = KeywordTrie::new();
        for (pattern, key) in keys.iter().enumerate() {
            trie.insert(key.iter().map(|&ch| codec.code(ch)), pattern as u32)?;
        }
        drop(keys);

        let packed = DoubleArrayPacker::new(&mut trie, values.len(), self.initial_capacity).pack()?;
        let tables = construct_failure_states(&mut trie, packed.base.len());
        let states = trie.len();
        drop(trie);

        let automaton = DoubleArray::new(packed.base, packed.check, tables.fail, tables.output);
        debug!(
            keywords = values.len(),
            alphabet = codec.len(),
            states,
            size = automaton.size(),
            nonzero = automaton.nonzero_size(),
            "built double-array automaton"
        );

        Ok(AhoCorasickDoubleArrayTrie::from_parts(
            automaton, codec, lengths, values,
        ))
    }

    /// Build from keywords alone; each keyword becomes its own payload.
    pub fn build_keywords<I, K>(&self, keywords: I) -> Result<AhoCorasickDoubleArrayTrie<String>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.build(keywords.into_iter().map(|k| {
            let k = k.as_ref().to_string();
            (k.clone(), k)
        }))
    }
}
