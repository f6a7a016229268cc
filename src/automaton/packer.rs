//! Packs the keyword trie into the `base`/`check` double array.
//!
//! Layout: a state at position `s` owns the block starting at `b = base[s]`.
//! Its child on symbol code `c` lives at `b + c + 1` and is live iff
//! `check[b + c + 1] == b`. Slot `b + 0` is reserved for the terminal cell of
//! a state that ends a keyword; that cell stores `-(pattern id) - 1` in `base`.
//! Every block offset is claimed at most once (`used`), so `check` names the
//! owning block unambiguously.
//!
//! Placement is first-fit from a cursor (`next_check_pos`) that only ever
//! moves forward. Regions that turn out to be almost fully occupied are
//! skipped by later searches.

use tracing::trace;

use super::trie::{KeywordTrie, TrieIdx};
use crate::{Error, Result};

/// Default starting allocation, in cells.
pub const DEFAULT_INITIAL_CAPACITY: usize = 65536 * 32;

/// Minimum multiplicative growth applied when a block does not fit.
const GROWTH_FLOOR: f64 = 1.05;

/// Occupancy of a scanned window past which the cursor jumps over it.
const DENSE_WINDOW_RATIO: f64 = 0.95;

/// Something to place in a sibling block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sibling {
    /// Terminal cell of a keyword, carrying its pattern id.
    Terminal(u32),
    /// A trie state that needs a block of its own.
    State(TrieIdx),
}

type Siblings = Vec<(u32, Sibling)>;

/// Output of a successful packing pass, trimmed to the reachable size.
#[derive(Debug)]
pub(crate) struct PackedArrays {
    pub(crate) base: Vec<i32>,
    pub(crate) check: Vec<i32>,
}

/// Encode a pattern id as a terminal `base` value.
#[inline]
pub(crate) fn encode_terminal(pattern: u32) -> Result<i32> {
    i32::try_from(-(pattern as i64) - 1).map_err(|_| Error::TooLarge)
}

/// Decode a terminal `base` value back to its pattern id.
#[inline]
pub(crate) fn decode_terminal(base: i32) -> Option<u32> {
    (base < 0).then(|| (-(base as i64) - 1) as u32)
}

/// Double-array placement state. Owns all build-time scratch arrays.
pub(crate) struct DoubleArrayPacker<'a> {
    trie: &'a mut KeywordTrie,
    base: Vec<i32>,
    check: Vec<i32>,
    used: Vec<bool>,
    alloc_size: usize,
    /// One past the highest position written so far.
    size: usize,
    next_check_pos: usize,
    /// Number of keywords in the dictionary.
    key_size: usize,
    /// Terminal cells written so far.
    progress: usize,
    initial_capacity: usize,
}

impl<'a> DoubleArrayPacker<'a> {
    pub(crate) fn new(trie: &'a mut KeywordTrie, key_size: usize, initial_capacity: usize) -> Self {
        Self {
            trie,
            base: Vec::new(),
            check: Vec::new(),
            used: Vec::new(),
            alloc_size: 0,
            size: 0,
            next_check_pos: 0,
            key_size,
            progress: 0,
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Place every trie state, recording each state's position in the trie.
    pub(crate) fn pack(mut self) -> Result<PackedArrays> {
        self.resize(self.initial_capacity);
        self.base[0] = 1;
        self.next_check_pos = 0;

        let root_siblings = self.fetch(TrieIdx::ROOT)?;
        if !root_siblings.is_empty() {
            // With the cursor at 0 the root block always lands at offset 1,
            // matching base[0].
            let begin = self.insert(&root_siblings)?;
            debug_assert_eq!(begin, 1);
            self.place_subtree(begin, root_siblings)?;
        }

        self.lose_weight();
        Ok(PackedArrays {
            base: self.base,
            check: self.check,
        })
    }

    /// Depth-first placement below an already inserted block.
    ///
    /// Each entry on the stack is a cell whose `base` is still unset. Entries
    /// are pushed in reverse so siblings are finished left to right.
    fn place_subtree(&mut self, begin: usize, siblings: Siblings) -> Result<()> {
        let mut stack: Vec<(usize, Sibling)> = siblings
            .into_iter()
            .rev()
            .map(|(code, sibling)| (begin + code as usize, sibling))
            .collect();

        while let Some((pos, sibling)) = stack.pop() {
            match sibling {
                Sibling::Terminal(pattern) => {
                    self.base[pos] = encode_terminal(pattern)?;
                    self.progress += 1;
                }
                Sibling::State(idx) => {
                    self.trie.set_index(idx, pos);
                    let children = self.fetch(idx)?;
                    // Every non-root state either has children or ends a keyword.
                    if children.is_empty() {
                        continue;
                    }
                    let child_begin = self.insert(&children)?;
                    self.base[pos] = to_cell(child_begin)?;
                    stack.extend(
                        children
                            .into_iter()
                            .rev()
                            .map(|(code, sibling)| (child_begin + code as usize, sibling)),
                    );
                }
            }
        }
        Ok(())
    }

    /// Collect the block contents for `parent`: the terminal cell first (code
    /// 0) if it ends a keyword, then each child at `symbol code + 1`.
    fn fetch(&self, parent: TrieIdx) -> Result<Siblings> {
        let children = self.trie.children(parent);
        let mut siblings = Vec::with_capacity(children.len() + 1);

        if self.trie.is_acceptable(parent) {
            if let Some(pattern) = self.trie.largest_emit(parent) {
                siblings.push((0, Sibling::Terminal(pattern)));
            }
        }

        for &(code, child) in children {
            let code = code + 1;
            if let Some(&(prev, _)) = siblings.last() {
                if prev >= code {
                    return Err(Error::Unsorted {
                        depth: self.trie.depth(parent) as usize + 1,
                    });
                }
            }
            siblings.push((code, Sibling::State(child)));
        }
        Ok(siblings)
    }

    /// Find a free block for `siblings`, claim it, and return its offset.
    fn insert(&mut self, siblings: &[(u32, Sibling)]) -> Result<usize> {
        let first = siblings[0].0 as usize;
        let last = siblings[siblings.len() - 1].0 as usize;

        let mut pos = (first + 1).max(self.next_check_pos) - 1;
        let mut nonzero_num = 0usize;
        let mut first_free = true;

        if self.alloc_size <= pos {
            self.resize(pos + 1);
        }

        let begin = 'search: loop {
            pos += 1;
            if self.alloc_size <= pos {
                self.resize(pos + 1);
            }
            if self.check[pos] != 0 {
                nonzero_num += 1;
                continue;
            } else if first_free {
                self.next_check_pos = pos;
                first_free = false;
            }

            let begin = pos - first;
            if self.alloc_size <= begin + last {
                self.grow(begin + last + 1);
            }
            if self.used[begin] {
                continue;
            }
            for &(code, _) in siblings {
                let p = begin + code as usize;
                if self.base[p] != 0 || self.check[p] != 0 {
                    continue 'search;
                }
            }
            break begin;
        };

        let scanned = (pos - self.next_check_pos + 1) as f64;
        if nonzero_num as f64 / scanned >= DENSE_WINDOW_RATIO {
            self.next_check_pos = pos;
        }

        self.used[begin] = true;
        self.size = self.size.max(begin + last + 1);

        let owner = to_cell(begin)?;
        for &(code, _) in siblings {
            self.check[begin + code as usize] = owner;
        }
        Ok(begin)
    }

    /// Grow by `max(1.05, keywords / placed)` until `required` cells fit.
    fn grow(&mut self, required: usize) {
        let factor = (self.key_size as f64 / (self.progress + 1) as f64).max(GROWTH_FLOOR);
        let mut new_size = self.alloc_size;
        while new_size < required {
            new_size = ((new_size as f64 * factor) as usize).max(new_size + 1);
        }
        self.resize(new_size);
    }

    fn resize(&mut self, new_size: usize) {
        trace!(from = self.alloc_size, to = new_size, "resizing double array");
        self.base.resize(new_size, 0);
        self.check.resize(new_size, 0);
        self.used.resize(new_size, false);
        self.alloc_size = new_size;
    }

    /// Trim both arrays to the highest occupied position and drop `used`.
    fn lose_weight(&mut self) {
        // An empty dictionary still keeps the root cell.
        let size = self.size.max(1);
        self.base.truncate(size);
        self.base.shrink_to_fit();
        self.check.truncate(size);
        self.check.shrink_to_fit();
        self.used = Vec::new();
        self.alloc_size = size;
    }
}

#[inline]
fn to_cell(offset: usize) -> Result<i32> {
    i32::try_from(offset).map_err(|_| Error::TooLarge)
}
