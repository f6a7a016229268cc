//! Failure links and merged output sets.
//!
//! Runs breadth-first over the trie after packing, when every state already
//! knows its packed position. A state's failure target is the deepest proper
//! suffix of its prefix that is also a trie prefix; its output is its own
//! emits plus everything its failure target outputs.

use std::collections::VecDeque;

use smallvec::SmallVec;

use super::trie::{KeywordTrie, TrieIdx};

/// Per-position failure and output tables, indexed by packed position.
#[derive(Debug)]
pub(crate) struct FailureTables {
    pub(crate) fail: Vec<u32>,
    pub(crate) output: Vec<Box<[u32]>>,
}

pub(crate) fn construct_failure_states(trie: &mut KeywordTrie, size: usize) -> FailureTables {
    let mut fail = vec![0u32; size + 1];
    let mut output: Vec<Box<[u32]>> = vec![Box::default(); size + 1];
    let mut queue = VecDeque::with_capacity(trie.len());

    let depth_one: SmallVec<[(u32, TrieIdx); 16]> = trie.children(TrieIdx::ROOT).into();
    for (_, state) in depth_one {
        trie.set_failure(state, TrieIdx::ROOT);
        fail[trie.index(state)] = trie.index(TrieIdx::ROOT) as u32;
        store_output(trie, state, &mut output);
        queue.push_back(state);
    }

    while let Some(current) = queue.pop_front() {
        let transitions: SmallVec<[(u32, TrieIdx); 4]> = trie.children(current).into();
        for (code, target) in transitions {
            queue.push_back(target);

            let mut trace = trie.failure(current);
            let new_failure = loop {
                if let Some(next) = trie.next_state(trace, code) {
                    break next;
                }
                trace = trie.failure(trace);
            };

            trie.set_failure(target, new_failure);
            fail[trie.index(target)] = trie.index(new_failure) as u32;
            trie.inherit_emits(target, new_failure);
            store_output(trie, target, &mut output);
        }
    }

    FailureTables { fail, output }
}

fn store_output(trie: &KeywordTrie, state: TrieIdx, output: &mut [Box<[u32]>]) {
    let emits = trie.emits(state);
    if !emits.is_empty() {
        output[trie.index(state)] = emits.into();
    }
}
