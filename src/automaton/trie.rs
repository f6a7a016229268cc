//! Build-time keyword trie.
//!
//! All states live in a single arena and refer to each other by [`TrieIdx`],
//! so the failure relation (which points back up the tree) is a plain index
//! rather than a shared pointer. The whole arena is dropped once the packed
//! automaton and its failure/output tables have been produced.

use smallvec::SmallVec;

use crate::{Error, Result};

/// Index into the trie arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct TrieIdx(u32);

impl TrieIdx {
    pub(crate) const ROOT: TrieIdx = TrieIdx(0);

    #[inline]
    pub(crate) fn get(self) -> usize {
        self.0 as usize
    }
}

/// One dictionary prefix.
#[derive(Default)]
struct TrieState {
    /// Prefix length in code points.
    depth: u32,
    /// `(symbol code, child)` in insertion order. A sorted dictionary appends
    /// children in ascending code order; the packer verifies this.
    children: SmallVec<[(u32, TrieIdx); 4]>,
    /// Pattern ids recognized here, kept in descending order.
    emits: SmallVec<[u32; 1]>,
    /// Position of this state in the packed arrays.
    index: usize,
    failure: TrieIdx,
}

/// Arena-backed trie over coded keywords.
pub(crate) struct KeywordTrie {
    nodes: Vec<TrieState>,
}

impl KeywordTrie {
    pub(crate) fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(TrieState::default());
        Self { nodes }
    }

    fn alloc(&mut self, depth: u32) -> TrieIdx {
        let idx = TrieIdx(self.nodes.len() as u32);
        self.nodes.push(TrieState {
            depth,
            ..TrieState::default()
        });
        idx
    }

    /// Find or create the child of `parent` reached by `code`.
    fn get_or_create_child(&mut self, parent: TrieIdx, code: u32) -> TrieIdx {
        let node = &self.nodes[parent.get()];
        // Sorted input always extends the most recently added child.
        if let Some(&(last, child)) = node.children.last() {
            if last == code {
                return child;
            }
        }
        if let Some(&(_, child)) = node.children.iter().find(|&&(c, _)| c == code) {
            return child;
        }

        let depth = node.depth + 1;
        let child = self.alloc(depth);
        self.nodes[parent.get()].children.push((code, child));
        child
    }

    /// Insert one coded keyword, registering `pattern` at its terminal state.
    pub(crate) fn insert<I>(&mut self, codes: I, pattern: u32) -> Result<()>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut state = TrieIdx::ROOT;
        for code in codes {
            state = self.get_or_create_child(state, code);
        }

        if state == TrieIdx::ROOT {
            return Err(Error::EmptyKeyword {
                index: pattern as usize,
            });
        }
        let node = &mut self.nodes[state.get()];
        if !node.emits.is_empty() {
            return Err(Error::DuplicateKeyword {
                index: pattern as usize,
            });
        }
        node.emits.push(pattern);
        Ok(())
    }

    /// Number of states, root included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn depth(&self, idx: TrieIdx) -> u32 {
        self.nodes[idx.get()].depth
    }

    #[inline]
    pub(crate) fn children(&self, idx: TrieIdx) -> &[(u32, TrieIdx)] {
        &self.nodes[idx.get()].children
    }

    #[inline]
    pub(crate) fn emits(&self, idx: TrieIdx) -> &[u32] {
        &self.nodes[idx.get()].emits
    }

    /// A state may emit only if it is below the root and terminates a keyword.
    #[inline]
    pub(crate) fn is_acceptable(&self, idx: TrieIdx) -> bool {
        let node = &self.nodes[idx.get()];
        node.depth > 0 && !node.emits.is_empty()
    }

    /// The largest pattern id emitted here.
    #[inline]
    pub(crate) fn largest_emit(&self, idx: TrieIdx) -> Option<u32> {
        self.nodes[idx.get()].emits.first().copied()
    }

    #[inline]
    pub(crate) fn index(&self, idx: TrieIdx) -> usize {
        self.nodes[idx.get()].index
    }

    #[inline]
    pub(crate) fn set_index(&mut self, idx: TrieIdx, index: usize) {
        self.nodes[idx.get()].index = index;
    }

    #[inline]
    pub(crate) fn failure(&self, idx: TrieIdx) -> TrieIdx {
        self.nodes[idx.get()].failure
    }

    #[inline]
    pub(crate) fn set_failure(&mut self, idx: TrieIdx, failure: TrieIdx) {
        self.nodes[idx.get()].failure = failure;
    }

    /// Merge the emits of `from` into `into`, keeping them descending and unique.
    pub(crate) fn inherit_emits(&mut self, into: TrieIdx, from: TrieIdx) {
        if self.nodes[from.get()].emits.is_empty() {
            return;
        }
        let inherited = self.nodes[from.get()].emits.clone();
        let emits = &mut self.nodes[into.get()].emits;
        emits.extend(inherited);
        emits.sort_unstable_by(|a, b| b.cmp(a));
        emits.dedup();
    }

    /// Goto function over the trie. The root loops to itself on a miss;
    /// any other state reports `None`.
    ///
    /// Requires children in ascending code order, which holds once packing
    /// has succeeded.
    pub(crate) fn next_state(&self, idx: TrieIdx, code: u32) -> Option<TrieIdx> {
        let children = &self.nodes[idx.get()].children;
        match children.binary_search_by_key(&code, |&(c, _)| c) {
            Ok(pos) => Some(children[pos].1),
            Err(_) if idx == TrieIdx::ROOT => Some(TrieIdx::ROOT),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_prefixes_share_states() {
        let mut trie = KeywordTrie::new();
        trie.insert([1, 2], 0).unwrap();
        trie.insert([1, 2, 3], 1).unwrap();
        trie.insert([1, 4], 2).unwrap();

        // root, 1, 1-2, 1-2-3, 1-4
        assert_eq!(trie.len(), 5);

        let a = trie.next_state(TrieIdx::ROOT, 1).unwrap();
        assert_eq!(trie.depth(a), 1);
        assert!(!trie.is_acceptable(a));
        assert_eq!(trie.children(a).len(), 2);

        let ab = trie.next_state(a, 2).unwrap();
        assert!(trie.is_acceptable(ab));
        assert_eq!(trie.emits(ab), &[0]);
    }

    #[test]
    fn test_root_loops_on_miss() {
        let mut trie = KeywordTrie::new();
        trie.insert([3], 0).unwrap();

        assert_eq!(trie.next_state(TrieIdx::ROOT, 7), Some(TrieIdx::ROOT));
        let child = trie.next_state(TrieIdx::ROOT, 3).unwrap();
        assert_eq!(trie.next_state(child, 7), None);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let mut trie = KeywordTrie::new();
        let err = trie.insert([0u32; 0], 4).unwrap_err();
        assert!(matches!(err, Error::EmptyKeyword { index: 4 }));
    }

    #[test]
    fn test_duplicate_keyword_rejected() {
        let mut trie = KeywordTrie::new();
        trie.insert([1, 2], 0).unwrap();
        let err = trie.insert([1, 2], 1).unwrap_err();
        assert!(matches!(err, Error::DuplicateKeyword { index: 1 }));
    }

    #[test]
    fn test_inherit_emits_descending_unique() {
        let mut trie = KeywordTrie::new();
        trie.insert([1], 0).unwrap();
        trie.insert([2], 3).unwrap();
        let a = trie.next_state(TrieIdx::ROOT, 1).unwrap();
        let b = trie.next_state(TrieIdx::ROOT, 2).unwrap();

        trie.inherit_emits(a, b);
        trie.inherit_emits(a, b);
        assert_eq!(trie.emits(a), &[3, 0]);
        assert_eq!(trie.largest_emit(a), Some(3));
    }
}
