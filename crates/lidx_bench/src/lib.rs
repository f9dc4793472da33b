//! Benchmark utilities.

use lidx_core::{Index, IndexResult, Normalizer};
use lidx_storage::MemoryStore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const SYLLABLES: &[&str] = &[
    "ka", "lo", "mi", "ne", "ru", "sa", "te", "vo", "zi", "pe", "qua", "bri", "dro", "fle", "gno",
];

/// Deterministic generator so runs are comparable.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x11d3)
}

/// A random lowercase word of two to four syllables.
pub fn random_word(rng: &mut impl Rng) -> String {
    let syllables = rng.gen_range(2..=4);
    (0..syllables)
        .map(|_| SYLLABLES[rng.gen_range(0..SYLLABLES.len())])
        .collect()
}

/// A fixed vocabulary of `size` random words.
pub fn vocabulary(rng: &mut impl Rng, size: usize) -> Vec<String> {
    (0..size).map(|_| random_word(rng)).collect()
}

/// A document of `words` words drawn from `vocabulary`, with some
/// capitalization and punctuation mixed in.
pub fn random_document(rng: &mut impl Rng, vocabulary: &[String], words: usize) -> String {
    let mut text = String::new();
    for i in 0..words {
        let word = &vocabulary[rng.gen_range(0..vocabulary.len())];
        if i > 0 {
            text.push_str(if rng.gen_ratio(1, 8) { ", " } else { " " });
        }
        if rng.gen_ratio(1, 5) {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                text.extend(first.to_uppercase());
                text.push_str(chars.as_str());
            }
        } else {
            text.push_str(word);
        }
    }
    text.push('.');
    text
}

/// An in-memory index.
pub fn memory_index() -> Index {
    Index::with_store(Arc::new(MemoryStore::new()), Arc::new(Normalizer::new()))
}

/// An in-memory index holding `docs` documents of `words` words each.
///
/// # Errors
///
/// Returns an error if indexing fails.
pub fn populated_index(docs: u64, words: usize) -> IndexResult<(Index, Vec<String>)> {
    let mut rng = rng();
    let vocabulary = vocabulary(&mut rng, 2_000);
    let mut index = memory_index();
    for doc in 0..docs {
        let text = random_document(&mut rng, &vocabulary, words);
        index.set_document(doc, &text)?;
    }
    index.flush()?;
    Ok((index, vocabulary))
}
