//! Key schema.
//!
//! The store's key space is split by a reserved first byte:
//!
//! ```text
//! .                   -> next word id
//! , varint(doc)       -> [word id...]              (DocWords)
//! / varint(word id)   -> word                      (reverse mapping)
//! word bytes          -> [word id, doc id...]      (Postings)
//! ```
//!
//! Normalized words never start with a reserved byte, so the four classes
//! never collide.

use crate::error::{IndexError, IndexResult};
use lidx_codec::VarintReader;

/// Prefix of the word counter key.
pub const COUNTER_PREFIX: u8 = b'.';
/// Prefix of per-document word sets.
pub const DOC_WORDS_PREFIX: u8 = b',';
/// Prefix of word-id to word mappings.
pub const WORD_REVERSE_PREFIX: u8 = b'/';

/// Every reserved first byte.
pub const RESERVED_PREFIXES: [u8; 3] = [COUNTER_PREFIX, DOC_WORDS_PREFIX, WORD_REVERSE_PREFIX];

/// The word counter key.
pub const COUNTER_KEY: &[u8] = &[COUNTER_PREFIX];

/// Key of the word set of document `doc`.
#[must_use]
pub fn doc_words_key(doc: u64) -> Vec<u8> {
    prefixed(DOC_WORDS_PREFIX, doc)
}

/// Key of the reverse mapping of `word_id`.
#[must_use]
pub fn word_reverse_key(word_id: u64) -> Vec<u8> {
    prefixed(WORD_REVERSE_PREFIX, word_id)
}

/// Key of the postings of `word`.
#[must_use]
pub fn word_key(word: &str) -> &[u8] {
    word.as_bytes()
}

/// Returns true if `key` belongs to one of the reserved classes.
#[must_use]
pub fn is_reserved(key: &[u8]) -> bool {
    key.first().is_some_and(|b| RESERVED_PREFIXES.contains(b))
}

fn prefixed(prefix: u8, id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + lidx_codec::encoded_len(id));
    key.push(prefix);
    lidx_codec::encode(&mut key, id);
    key
}

/// The class a stored key belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyClass {
    /// The word counter.
    Counter,
    /// Word set of a document.
    DocWords(u64),
    /// Reverse mapping of a word id.
    WordReverse(u64),
    /// Postings of a word.
    Word(String),
}

impl KeyClass {
    /// Classifies a raw store key.
    ///
    /// # Errors
    ///
    /// Returns an error if a reserved key carries a malformed suffix or a word
    /// key is not UTF-8.
    pub fn parse(key: &[u8]) -> IndexResult<Self> {
        match key.split_first() {
            Some((&COUNTER_PREFIX, [])) => Ok(Self::Counter),
            Some((&COUNTER_PREFIX, _)) => Err(IndexError::corrupted(format!(
                "unexpected suffix on counter key {key:?}"
            ))),
            Some((&DOC_WORDS_PREFIX, rest)) => Ok(Self::DocWords(single_id(rest)?)),
            Some((&WORD_REVERSE_PREFIX, rest)) => Ok(Self::WordReverse(single_id(rest)?)),
            _ => String::from_utf8(key.to_vec())
                .map(Self::Word)
                .map_err(|_| IndexError::corrupted(format!("word key is not UTF-8: {key:?}"))),
        }
    }
}

fn single_id(bytes: &[u8]) -> IndexResult<u64> {
    let mut reader = VarintReader::new(bytes);
    let id = reader.read()?;
    reader.finish()?;
    Ok(id)
}
