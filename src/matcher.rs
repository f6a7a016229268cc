//! Query surface of a built automaton.

use std::fmt;
use std::str::Chars;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::automaton::{DoubleArray, SymbolCodec, ROOT_STATE};
use crate::{Builder, Hit, Result};

/// Aho-Corasick automaton over a double-array trie, with a payload per keyword.
///
/// Immutable once built. Every query takes `&self`, so one instance can be
/// shared (for example behind an `Arc`) by any number of concurrent scans.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AhoCorasickDoubleArrayTrie<V> {
    automaton: DoubleArray,
    codec: SymbolCodec,
    /// Keyword length in chars, by pattern id.
    lengths: Vec<u32>,
    /// Payload, by pattern id.
    values: Vec<V>,
}

impl<V> AhoCorasickDoubleArrayTrie<V> {
    /// Build with default settings. See [`Builder::build`].
    pub fn build<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        Builder::new().build(pairs)
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub(crate) fn from_parts(
        automaton: DoubleArray,
        codec: SymbolCodec,
        lengths: Vec<u32>,
        values: Vec<V>,
    ) -> Self {
        Self {
            automaton,
            codec,
            lengths,
            values,
        }
    }

    #[inline]
    fn hit(&self, end: usize, pattern: u32) -> Hit<'_, V> {
        let idx = pattern as usize;
        Hit {
            begin: end - self.lengths[idx] as usize,
            end,
            pattern,
            value: &self.values[idx],
        }
    }

    /// Lazily iterate over every occurrence, overlaps included.
    ///
    /// Hits come in order of their end offset; hits sharing an end offset
    /// come largest pattern id first.
    pub fn find_iter<'a, 't>(&'a self, text: &'t str) -> FindIter<'a, 't, V> {
        FindIter {
            acdat: self,
            chars: text.chars(),
            state: ROOT_STATE,
            position: 0,
            pending: (&[] as &[u32]).iter(),
        }
    }

    /// Collect every occurrence in `text`, in [`find_iter`](Self::find_iter) order.
    pub fn find_all(&self, text: &str) -> Vec<Hit<'_, V>> {
        self.find_iter(text).collect()
    }

    /// Report every occurrence to `on_hit(begin, end, value)` as the scan
    /// reaches it, without collecting.
    pub fn for_each_match<F>(&self, text: &str, mut on_hit: F)
    where
        F: FnMut(usize, usize, &V),
    {
        let mut state = ROOT_STATE;
        for (i, ch) in text.chars().enumerate() {
            state = self.automaton.next_state(state, self.codec.code(ch));
            let end = i + 1;
            for &pattern in self.automaton.output(state) {
                let idx = pattern as usize;
                on_hit(end - self.lengths[idx] as usize, end, &self.values[idx]);
            }
        }
    }

    /// True if any keyword occurs in `text`. Stops at the first hit.
    pub fn is_match(&self, text: &str) -> bool {
        let mut state = ROOT_STATE;
        text.chars().any(|ch| {
            state = self.automaton.next_state(state, self.codec.code(ch));
            !self.automaton.output(state).is_empty()
        })
    }

    /// The occurrence with the smallest end offset, if any.
    pub fn find_first(&self, text: &str) -> Option<Hit<'_, V>> {
        self.find_iter(text).next()
    }

    /// Payload of `key` if it is exactly a dictionary keyword.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.exact_match_search(key)
            .map(|pattern| &self.values[pattern as usize])
    }

    /// Pattern id of `key` if it is exactly a dictionary keyword.
    pub fn exact_match_search(&self, key: &str) -> Option<u32> {
        self.exact_match_search_from(key, 0, None, ROOT_STATE)
    }

    /// Exact match of `key[start..end]` (in chars) walking from `state`.
    ///
    /// `end = None` runs to the end of `key`. `state` is a packed position,
    /// `ROOT_STATE` for a fresh lookup; passing a position reached by an
    /// earlier walk resumes from there. No failure links are followed: the
    /// walk fails as soon as a transition is missing.
    pub fn exact_match_search_from(
        &self,
        key: &str,
        start: usize,
        end: Option<usize>,
        state: usize,
    ) -> Option<u32> {
        let end = end.unwrap_or(usize::MAX);
        let codes = key
            .chars()
            .take(end)
            .skip(start)
            .map(|ch| self.codec.code(ch));
        self.automaton.exact_match(codes, state)
    }

    /// Payload registered under `pattern`.
    pub fn value(&self, pattern: u32) -> Option<&V> {
        self.values.get(pattern as usize)
    }

    /// Length in chars of the keyword registered under `pattern`.
    pub fn keyword_len(&self, pattern: u32) -> Option<usize> {
        self.lengths.get(pattern as usize).map(|&l| l as usize)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length of the packed `base`/`check` arrays.
    pub fn size(&self) -> usize {
        self.automaton.size()
    }

    /// Number of occupied double-array cells.
    pub fn nonzero_size(&self) -> usize {
        self.automaton.nonzero_size()
    }

    pub fn automaton(&self) -> &DoubleArray {
        &self.automaton
    }

    pub fn codec(&self) -> &SymbolCodec {
        &self.codec
    }
}

impl AhoCorasickDoubleArrayTrie<String> {
    /// Build from keywords alone; each keyword is its own payload.
    pub fn from_keywords<I, K>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Builder::new().build_keywords(keywords)
    }
}

impl<V: fmt::Debug> fmt::Debug for AhoCorasickDoubleArrayTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AhoCorasickDoubleArrayTrie")
            .field("base", &self.automaton.base())
            .field("check", &self.automaton.check())
            .field("lengths", &self.lengths)
            .field("values", &self.values)
            .finish()
    }
}

/// Iterator over overlapping hits, created by
/// [`AhoCorasickDoubleArrayTrie::find_iter`].
pub struct FindIter<'a, 't, V> {
    acdat: &'a AhoCorasickDoubleArrayTrie<V>,
    chars: Chars<'t>,
    state: usize,
    /// Chars consumed so far, i.e. the end offset of pending hits.
    position: usize,
    pending: std::slice::Iter<'a, u32>,
}

impl<'a, V> Iterator for FindIter<'a, '_, V> {
    type Item = Hit<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let acdat: &'a AhoCorasickDoubleArrayTrie<V> = self.acdat;
            if let Some(&pattern) = self.pending.next() {
                return Some(acdat.hit(self.position, pattern));
            }
            let ch = self.chars.next()?;
            let automaton = &acdat.automaton;
            self.state = automaton.next_state(self.state, acdat.codec.code(ch));
            self.position += 1;
            self.pending = automaton.output(self.state).iter();
        }
    }
}
