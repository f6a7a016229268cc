//! Dense symbol coding for dictionary code points.
//!
//! Every distinct `char` that appears in at least one keyword gets a code in
//! `1..=N`, assigned in ascending code-point order. Code `0` is never handed
//! out and `N + 1` is returned for anything outside the dictionary alphabet.
//! No double-array cell is ever placed for `N + 1`, so an out-of-vocabulary
//! symbol can never complete a transition.

use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps dictionary code points to dense positive integers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SymbolCodec {
    codes: FxHashMap<char, u32>,
    /// One past the last assigned code; doubles as the "unknown" sentinel.
    next_code: u32,
}

impl SymbolCodec {
    /// Build the code table from every keyword in the dictionary.
    pub fn new<'a, I>(keywords: I) -> Self
    where
        I: IntoIterator<Item = &'a [char]>,
    {
        let mut alphabet: Vec<char> = keywords.into_iter().flatten().copied().collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        let mut codes = FxHashMap::default();
        codes.reserve(alphabet.len());
        for (i, ch) in alphabet.into_iter().enumerate() {
            codes.insert(ch, i as u32 + 1);
        }
        let next_code = codes.len() as u32 + 1;

        Self { codes, next_code }
    }

    /// Code for `ch`, or the sentinel [`unknown`](Self::unknown) if `ch`
    /// never appeared in the dictionary.
    #[inline]
    pub fn code(&self, ch: char) -> u32 {
        self.codes.get(&ch).copied().unwrap_or(self.next_code)
    }

    /// The out-of-vocabulary sentinel, `N + 1`.
    #[inline]
    pub fn unknown(&self) -> u32 {
        self.next_code
    }

    /// Number of distinct code points in the dictionary.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(words: &[&str]) -> Vec<Vec<char>> {
        words.iter().map(|w| w.chars().collect()).collect()
    }

    #[test]
    fn test_codes_follow_code_point_order() {
        let words = chars(&["she", "he", "hers"]);
        let codec = SymbolCodec::new(words.iter().map(Vec::as_slice));

        // alphabet: e h r s
        assert_eq!(codec.len(), 4);
        assert_eq!(codec.code('e'), 1);
        assert_eq!(codec.code('h'), 2);
        assert_eq!(codec.code('r'), 3);
        assert_eq!(codec.code('s'), 4);
    }

    #[test]
    fn test_unknown_symbol_gets_sentinel() {
        let words = chars(&["ab"]);
        let codec = SymbolCodec::new(words.iter().map(Vec::as_slice));

        assert_eq!(codec.unknown(), 3);
        assert_eq!(codec.code('z'), 3);
        assert_eq!(codec.code('\0'), 3);
    }

    #[test]
    fn test_multibyte_code_points() {
        let words = chars(&["世界", "全世界"]);
        let codec = SymbolCodec::new(words.iter().map(Vec::as_slice));

        assert_eq!(codec.len(), 3);
        // U+4E16 < U+5168 < U+754C
        assert_eq!(codec.code('世'), 1);
        assert_eq!(codec.code('全'), 2);
        assert_eq!(codec.code('界'), 3);
    }

    #[test]
    fn test_empty_dictionary() {
        let codec = SymbolCodec::new(std::iter::empty());
        assert!(codec.is_empty());
        assert_eq!(codec.code('a'), 1);
    }
}
