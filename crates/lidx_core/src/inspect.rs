//! Whole-index diagnostics.
//!
//! Both functions walk the full key space, so they cost time proportional to
//! the size of the index. They are meant for tooling, not for hot paths.

use crate::error::{IndexError, IndexResult};
use crate::keys::KeyClass;
use crate::postings::{self, Postings};
use lidx_storage::KvStore;

/// Summary counts for an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Number of live words.
    pub words: u64,
    /// Number of indexed documents.
    pub documents: u64,
    /// Id the next new word will receive.
    pub next_word_id: u64,
}

/// One decoded store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The word counter.
    Counter {
        /// Id the next new word will receive.
        next_word_id: u64,
    },
    /// The word set of a document.
    DocWords {
        /// The document.
        doc: u64,
        /// Ids of the words it contains.
        word_ids: Vec<u64>,
    },
    /// Reverse mapping from a word id to its word.
    WordReverse {
        /// The word id.
        word_id: u64,
        /// The word.
        word: String,
    },
    /// Postings of a word.
    Postings {
        /// The word.
        word: String,
        /// Its id and documents.
        postings: Postings,
    },
}

/// Decodes one raw key/value pair.
///
/// # Errors
///
/// Returns an error if the key or value does not follow the schema.
pub fn decode_entry(key: &[u8], value: &[u8]) -> IndexResult<Entry> {
    Ok(match KeyClass::parse(key)? {
        KeyClass::Counter => Entry::Counter {
            next_word_id: postings::decode_counter(value)?,
        },
        KeyClass::DocWords(doc) => Entry::DocWords {
            doc,
            word_ids: postings::decode_word_ids(value)?,
        },
        KeyClass::WordReverse(word_id) => Entry::WordReverse {
            word_id,
            word: String::from_utf8(value.to_vec()).map_err(|_| {
                IndexError::corrupted(format!("reverse mapping of word {word_id} is not UTF-8"))
            })?,
        },
        KeyClass::Word(word) => Entry::Postings {
            postings: Postings::decode(value)?,
            word,
        },
    })
}

/// Visits every stored entry in key order, decoded.
///
/// The visitor returns `true` to continue. The first decode error stops the
/// walk and is returned.
///
/// # Errors
///
/// Returns an error if the store fails or an entry does not decode.
pub fn for_each_entry(
    store: &dyn KvStore,
    mut visitor: impl FnMut(Entry) -> bool,
) -> IndexResult<()> {
    let mut failure = None;
    store.scan_from(b"", &mut |key, value| match decode_entry(key, value) {
        Ok(entry) => visitor(entry),
        Err(err) => {
            failure = Some(err);
            false
        }
    })?;
    failure.map_or(Ok(()), Err)
}

/// Counts words and documents.
///
/// # Errors
///
/// Returns an error if the store fails or an entry does not decode.
pub fn stats(store: &dyn KvStore) -> IndexResult<IndexStats> {
    let mut stats = IndexStats::default();
    for_each_entry(store, |entry| {
        match entry {
            Entry::Counter { next_word_id } => stats.next_word_id = next_word_id,
            Entry::DocWords { .. } => stats.documents += 1,
            Entry::Postings { .. } => stats.words += 1,
            Entry::WordReverse { .. } => {}
        }
        true
    })?;
    Ok(stats)
}

/// Collects every stored entry.
///
/// # Errors
///
/// Returns an error if the store fails or an entry does not decode.
pub fn entries(store: &dyn KvStore) -> IndexResult<Vec<Entry>> {
    let mut entries = Vec::new();
    for_each_entry(store, |entry| {
        entries.push(entry);
        true
    })?;
    Ok(entries)
}
