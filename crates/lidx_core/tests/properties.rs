//! Randomized checks of the index against a naive model.

use lidx_core::{keys, Entry, Index, Normalizer, SearchKind};
use lidx_storage::MemoryStore;
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

const VOCAB: &[&str] = &[
    "alpha", "alphabet", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota",
];

#[derive(Debug, Clone)]
enum Op {
    Set(u64, Vec<usize>),
    Remove(u64),
    Flush,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u64..6, prop::collection::vec(0..VOCAB.len(), 0..6))
            .prop_map(|(doc, words)| Op::Set(doc, words)),
        2 => (0u64..6).prop_map(Op::Remove),
        1 => Just(Op::Flush),
    ]
}

/// Documents whose words satisfy `matches`, according to the model.
fn expected(
    model: &BTreeMap<u64, BTreeSet<&'static str>>,
    matches: impl Fn(&str) -> bool,
) -> Vec<u64> {
    model
        .iter()
        .filter(|(_, words)| words.iter().any(|w| matches(w)))
        .map(|(doc, _)| *doc)
        .collect()
}

proptest! {
    #[test]
    fn index_agrees_with_model(ops in prop::collection::vec(op(), 1..40)) {
        let mut index = Index::with_store(Arc::new(MemoryStore::new()), Arc::new(Normalizer::new()));
        let mut model: BTreeMap<u64, BTreeSet<&'static str>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Set(doc, words) => {
                    let words: Vec<&'static str> = words.into_iter().map(|i| VOCAB[i]).collect();
                    index.set_document(doc, &words.join(" ")).unwrap();
                    model.insert(doc, words.into_iter().collect());
                }
                Op::Remove(doc) => {
                    let removed = index.remove_document(doc).unwrap();
                    prop_assert_eq!(removed, model.remove(&doc).is_some());
                }
                Op::Flush => index.flush().unwrap(),
            }
        }

        for word in VOCAB {
            let head = &word[..word.len().min(3)];
            prop_assert_eq!(
                index.search(head, SearchKind::Prefix).unwrap(),
                expected(&model, |w| w.starts_with(head))
            );
            let tail = &word[word.len() - 2..];
            prop_assert_eq!(
                index.search(tail, SearchKind::Suffix).unwrap(),
                expected(&model, |w| w.ends_with(tail))
            );
            prop_assert_eq!(
                index.search(&word[1..], SearchKind::Substring).unwrap(),
                expected(&model, |w| w.contains(&word[1..]))
            );
        }

        let live: BTreeSet<&str> = model.values().flatten().copied().collect();
        let stats = index.stats().unwrap();
        prop_assert_eq!(stats.documents, model.len() as u64);
        prop_assert_eq!(stats.words, live.len() as u64);
    }

    #[test]
    fn stored_words_are_printable_ascii(text in "\\PC{0,60}") {
        let store = Arc::new(MemoryStore::new());
        let mut index = Index::with_store(store, Arc::new(Normalizer::new()));
        index.set_document(1, &text).unwrap();

        for entry in index.entries().unwrap() {
            if let Entry::Postings { word, .. } = entry {
                prop_assert!(!word.is_empty());
                prop_assert!(word.bytes().all(|b| b.is_ascii_graphic()), "{:?}", word);
                prop_assert!(!keys::is_reserved(word.as_bytes()), "{:?}", word);
            }
        }
    }
}
