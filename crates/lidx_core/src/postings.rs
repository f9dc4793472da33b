//! Value encodings for postings, document word sets and the counter.

use crate::error::{IndexError, IndexResult};
use lidx_codec::VarintReader;
use std::collections::BTreeSet;

/// Postings of one word: its id and the documents containing it.
///
/// Encoded as `varint(word_id) varint(doc)...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postings {
    /// Id of the word.
    pub word_id: u64,
    /// Documents containing the word, in insertion order.
    pub docs: Vec<u64>,
}

impl Postings {
    /// Postings of a freshly created word.
    #[must_use]
    pub fn new(word_id: u64, doc: u64) -> Self {
        Self {
            word_id,
            docs: vec![doc],
        }
    }

    /// Decodes a stored postings value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or holds a malformed varint.
    pub fn decode(value: &[u8]) -> IndexResult<Self> {
        let mut reader = VarintReader::new(value);
        if reader.is_exhausted() {
            return Err(IndexError::corrupted("postings value has no word id"));
        }
        let word_id = reader.read()?;
        let docs = reader.collect::<Result<Vec<_>, _>>()?;
        Ok(Self { word_id, docs })
    }

    /// Encodes the postings for storage.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(1 + self.docs.len() * 2);
        lidx_codec::encode(&mut buf, self.word_id);
        lidx_codec::encode_all(&mut buf, self.docs.iter().copied());
        buf
    }

    /// Appends `doc` unless it is already listed. Returns true if added.
    pub fn add_doc(&mut self, doc: u64) -> bool {
        if self.docs.contains(&doc) {
            return false;
        }
        self.docs.push(doc);
        true
    }

    /// Drops every occurrence of `doc`. Returns true if anything was removed.
    pub fn remove_doc(&mut self, doc: u64) -> bool {
        let before = self.docs.len();
        self.docs.retain(|&d| d != doc);
        self.docs.len() != before
    }

    /// Returns true if no documents remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Encodes a document's word set as ascending varints.
#[must_use]
pub fn encode_word_ids(word_ids: &BTreeSet<u64>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(word_ids.len() * 2);
    lidx_codec::encode_all(&mut buf, word_ids.iter().copied());
    buf
}

/// Decodes a document's word set.
///
/// # Errors
///
/// Returns an error on a malformed varint.
pub fn decode_word_ids(value: &[u8]) -> IndexResult<Vec<u64>> {
    Ok(lidx_codec::decode_all(value)?)
}

/// Decodes the stored counter value.
///
/// # Errors
///
/// Returns an error unless the value is exactly one varint.
pub fn decode_counter(value: &[u8]) -> IndexResult<u64> {
    let mut reader = VarintReader::new(value);
    let next = reader.read()?;
    reader.finish()?;
    Ok(next)
}
