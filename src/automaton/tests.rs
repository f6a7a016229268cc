use super::*;
use crate::AhoCorasickDoubleArrayTrie;

fn ushers() -> AhoCorasickDoubleArrayTrie<&'static str> {
    AhoCorasickDoubleArrayTrie::build([
        ("he", "he"),
        ("hers", "hers"),
        ("his", "his"),
        ("she", "she"),
    ])
    .unwrap()
}

/// Every state reachable from the root by direct transitions.
fn reachable_states(da: &DoubleArray, alphabet: u32) -> Vec<usize> {
    let mut seen = vec![ROOT_STATE];
    let mut i = 0;
    while i < seen.len() {
        let state = seen[i];
        for code in 1..=alphabet {
            if let Some(next) = da.transition(state, code) {
                seen.push(next);
            }
        }
        i += 1;
    }
    seen
}

#[test]
fn test_root_absorbs_misses() {
    let acdat = ushers();
    let da = acdat.automaton();
    let unknown = acdat.codec().unknown();

    assert_eq!(da.transition(ROOT_STATE, unknown), None);
    assert_eq!(da.transition_with_root(ROOT_STATE, unknown), Some(ROOT_STATE));
    assert_eq!(da.next_state(ROOT_STATE, unknown), ROOT_STATE);
    // 'e' starts no keyword
    let e = acdat.codec().code('e');
    assert_eq!(da.next_state(ROOT_STATE, e), ROOT_STATE);
}

#[test]
fn test_step_is_total() {
    let acdat = ushers();
    let da = acdat.automaton();
    let alphabet = acdat.codec().len() as u32;
    let states = reachable_states(da, alphabet);

    // root, h, he, her, hers, hi, his, s, sh, she
    assert_eq!(states.len(), 10);

    for &state in &states {
        for code in 0..=alphabet + 1 {
            let next = da.next_state(state, code);
            assert!(next < da.size(), "state {state} code {code} -> {next}");
            assert!(next == ROOT_STATE || states.contains(&next));
        }
    }
}

#[test]
fn test_failure_fallback_finds_suffix_state() {
    let acdat = ushers();
    let da = acdat.automaton();
    let code = |ch| acdat.codec().code(ch);

    let s = da.next_state(ROOT_STATE, code('s'));
    let sh = da.next_state(s, code('h'));
    let she = da.next_state(sh, code('e'));
    let he = da.next_state(da.next_state(ROOT_STATE, code('h')), code('e'));
    assert_eq!(da.failure(she), he);

    // "she" has no 'r' child; falls back to "he" which does.
    let her = da.transition(he, code('r')).unwrap();
    assert_eq!(da.transition(she, code('r')), None);
    assert_eq!(da.next_state(she, code('r')), her);
}

#[test]
fn test_outputs_are_merged_through_failure_links() {
    let acdat = ushers();
    let da = acdat.automaton();
    let code = |ch| acdat.codec().code(ch);

    let she = "she"
        .chars()
        .fold(ROOT_STATE, |state, ch| da.next_state(state, code(ch)));
    // she = 3, he = 0
    assert_eq!(da.output(she), &[3, 0]);
    assert!(da.output(ROOT_STATE).is_empty());
}

#[test]
fn test_exact_match_resumes_from_state() {
    let acdat = ushers();
    let da = acdat.automaton();
    let code = |ch| acdat.codec().code(ch);

    let h = da.transition(ROOT_STATE, code('h')).unwrap();
    assert_eq!(da.exact_match("ers".chars().map(code), h), Some(1));
    assert_eq!(da.exact_match("e".chars().map(code), h), Some(0));
    assert_eq!(da.exact_match("is".chars().map(code), h), Some(2));
    assert_eq!(da.exact_match("er".chars().map(code), h), None);
    assert_eq!(da.exact_match(std::iter::empty(), h), None);
}

#[test]
fn test_exact_match_ignores_failure_links() {
    let acdat = ushers();
    let da = acdat.automaton();
    let code = |ch| acdat.codec().code(ch);

    // "shers" contains "hers" but is not itself a keyword.
    assert_eq!(da.exact_match("shers".chars().map(code), ROOT_STATE), None);
    assert_eq!(da.exact_match("she".chars().map(code), ROOT_STATE), Some(3));
}

#[test]
fn test_exact_match_from_invalid_state() {
    let acdat = ushers();
    let da = acdat.automaton();
    let code = acdat.codec().code('h');

    assert_eq!(da.exact_match([code], da.size() + 10), None);
}

#[test]
fn test_occupied_cells() {
    let acdat = ushers();
    let da = acdat.automaton();

    // 9 non-root states plus 4 terminal cells
    assert_eq!(da.nonzero_size(), 13);
    assert!(da.size() >= da.nonzero_size());
    assert_eq!(da.base().len(), da.check().len());
}

#[test]
fn test_growth_preserves_placement() {
    let words: Vec<String> = (0..3000u32)
        .map(|i| format!("{:x}-{}", i.wrapping_mul(2654435761), i % 97))
        .collect();
    let mut sorted = words.clone();
    sorted.sort();

    let tiny = crate::Builder::new()
        .initial_capacity(4)
        .build(sorted.iter().map(|w| (w.as_str(), w.len())))
        .unwrap();
    let roomy = crate::Builder::new()
        .build(sorted.iter().map(|w| (w.as_str(), w.len())))
        .unwrap();

    assert_eq!(tiny.size(), roomy.size());
    assert_eq!(tiny.nonzero_size(), roomy.nonzero_size());
    assert_eq!(tiny.automaton(), roomy.automaton());

    let text: String = words[..50].concat();
    let spans = |acdat: &crate::AhoCorasickDoubleArrayTrie<usize>| -> Vec<(usize, usize, usize)> {
        acdat
            .find_all(&text)
            .iter()
            .map(|h| (h.begin(), h.end(), *h.value()))
            .collect()
    };
    let a = spans(&tiny);
    let b = spans(&roomy);
    assert_eq!(a, b);
    assert!(a.len() >= 50);
}
