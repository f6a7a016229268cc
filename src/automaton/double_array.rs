//! The immutable packed automaton consulted at query time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::packer::decode_terminal;

/// Position of the root state.
pub const ROOT_STATE: usize = 0;

/// Double array plus the Aho-Corasick failure and output tables.
///
/// All four tables are indexed by packed position. A position is a state of
/// the automaton if some transition leads to it; terminal cells (negative
/// `base`) are never states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleArray {
    base: Vec<i32>,
    check: Vec<i32>,
    fail: Vec<u32>,
    output: Vec<Box<[u32]>>,
}

impl DoubleArray {
    pub(crate) fn new(
        base: Vec<i32>,
        check: Vec<i32>,
        fail: Vec<u32>,
        output: Vec<Box<[u32]>>,
    ) -> Self {
        debug_assert_eq!(base.len(), check.len());
        Self {
            base,
            check,
            fail,
            output,
        }
    }

    /// Cell reached from a block at `base` on `code`, if that cell belongs to it.
    #[inline]
    fn child(&self, base: i32, code: u32) -> Option<usize> {
        if base <= 0 {
            return None;
        }
        let p = base as usize + code as usize + 1;
        (self.check.get(p) == Some(&base)).then_some(p)
    }

    /// Direct transition; `None` if `state` has no child on `code`.
    #[inline]
    pub fn transition(&self, state: usize, code: u32) -> Option<usize> {
        let base = *self.base.get(state)?;
        self.child(base, code)
    }

    /// Direct transition where the root absorbs every miss.
    #[inline]
    pub fn transition_with_root(&self, state: usize, code: u32) -> Option<usize> {
        match self.transition(state, code) {
            Some(next) => Some(next),
            None if state == ROOT_STATE => Some(ROOT_STATE),
            None => None,
        }
    }

    /// Total step function: direct transition, otherwise fall back along
    /// failure links until one succeeds. Always ends at the root at worst.
    #[inline]
    pub fn next_state(&self, mut state: usize, code: u32) -> usize {
        loop {
            if let Some(next) = self.transition_with_root(state, code) {
                return next;
            }
            state = self.failure(state);
        }
    }

    /// Pattern ids recognized on reaching `state`, largest id first.
    #[inline]
    pub fn output(&self, state: usize) -> &[u32] {
        self.output.get(state).map_or(&[][..], |o| &o[..])
    }

    /// Failure target of `state`.
    #[inline]
    pub fn failure(&self, state: usize) -> usize {
        self.fail.get(state).map_or(ROOT_STATE, |&f| f as usize)
    }

    /// Consume `codes` from `state` without any failure fallback and report
    /// the pattern id ending exactly there.
    pub fn exact_match<I>(&self, codes: I, state: usize) -> Option<u32>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut base = *self.base.get(state)?;
        for code in codes {
            let p = self.child(base, code)?;
            base = self.base[p];
        }
        if base <= 0 {
            return None;
        }
        let p = base as usize;
        if self.check.get(p) == Some(&base) {
            decode_terminal(self.base[p])
        } else {
            None
        }
    }

    /// Allocated length of `base`/`check`.
    #[inline]
    pub fn size(&self) -> usize {
        self.base.len()
    }

    /// Number of occupied cells (`check != 0`).
    pub fn nonzero_size(&self) -> usize {
        self.check.iter().filter(|&&c| c != 0).count()
    }

    pub fn base(&self) -> &[i32] {
        &self.base
    }

    pub fn check(&self) -> &[i32] {
        &self.check
    }
}
