//! Document add/remove logic.
//!
//! `set_document` maintains three mappings at once:
//! - word -> postings (word id + documents)
//! - word id -> word (to find the postings again on removal)
//! - document -> word ids (to know what to remove)
//!
//! All reads and writes go through the [`WriteBuffer`]; nothing reaches the
//! store until the buffer is flushed.

use crate::buffer::WriteBuffer;
use crate::error::{IndexError, IndexResult};
use crate::keys::{self, COUNTER_KEY};
use crate::normalizer::Normalizer;
use crate::postings::{self, Postings};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace};

/// Outcome of looking up a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordResolution {
    /// The word was already indexed under this id.
    Found(u64),
    /// The word was new and got this id.
    Created(u64),
}

impl WordResolution {
    /// The word id, whichever way it was obtained.
    #[must_use]
    pub const fn word_id(self) -> u64 {
        match self {
            Self::Found(id) | Self::Created(id) => id,
        }
    }
}

/// Applies document mutations to a [`WriteBuffer`].
///
/// A store failure aborts the operation in progress. Mutations already
/// buffered by that operation stay buffered; re-issuing the same call
/// converges to the intended state.
pub struct Indexer<'a> {
    buffer: &'a mut WriteBuffer,
    normalizer: &'a Normalizer,
}

impl<'a> Indexer<'a> {
    /// Creates an indexer over `buffer`.
    pub fn new(buffer: &'a mut WriteBuffer, normalizer: &'a Normalizer) -> Self {
        Self { buffer, normalizer }
    }

    /// Indexes `text` as the full content of `doc`, replacing any previous
    /// content.
    ///
    /// A word that occurs several times in `text` is recorded once, both in
    /// the document's word set and in the word's postings.
    ///
    /// Returns the number of distinct words indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds undecodable values.
    pub fn set_document(&mut self, doc: u64, text: &str) -> IndexResult<usize> {
        self.remove_document(doc)?;

        let normalizer = self.normalizer;
        let mut seen = HashSet::new();
        let mut word_ids = BTreeSet::new();

        for word in normalizer.words(text) {
            if seen.contains(&word) {
                continue;
            }
            let resolution = self.resolve_word(&word, doc)?;
            word_ids.insert(resolution.word_id());
            seen.insert(word);
        }

        self.buffer
            .put(keys::doc_words_key(doc), postings::encode_word_ids(&word_ids));
        debug!(doc, words = word_ids.len(), "indexed document");
        Ok(word_ids.len())
    }

    /// Resolves `word` to its id, creating it if needed, and records `doc`
    /// in its postings.
    ///
    /// A new word gets the next id from the counter; the counter, postings
    /// and reverse mapping are all buffered together.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails, a stored value does not decode,
    /// or the id space is exhausted.
    pub fn resolve_word(&mut self, word: &str, doc: u64) -> IndexResult<WordResolution> {
        let key = keys::word_key(word);

        if let Some(value) = self.buffer.get(key)? {
            let mut postings = Postings::decode(&value)?;
            if postings.add_doc(doc) {
                self.buffer.put(key.to_vec(), postings.encode());
            }
            return Ok(WordResolution::Found(postings.word_id));
        }

        let word_id = self.next_word_id()?;
        let next = word_id
            .checked_add(1)
            .ok_or_else(|| IndexError::corrupted("word id space exhausted"))?;

        self.buffer
            .put(COUNTER_KEY.to_vec(), lidx_codec::encode_to_vec(next));
        self.buffer
            .put(key.to_vec(), Postings::new(word_id, doc).encode());
        self.buffer
            .put(keys::word_reverse_key(word_id), word.as_bytes().to_vec());
        trace!(word, word_id, "allocated word id");

        Ok(WordResolution::Created(word_id))
    }

    fn next_word_id(&mut self) -> IndexResult<u64> {
        match self.buffer.get(COUNTER_KEY)? {
            Some(value) => postings::decode_counter(&value),
            None => Ok(0),
        }
    }

    /// Removes `doc` from the index.
    ///
    /// Words left without documents are retired: their postings and reverse
    /// mapping are deleted. Their ids are never handed out again.
    ///
    /// Returns false if `doc` was not indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or holds undecodable values.
    pub fn remove_document(&mut self, doc: u64) -> IndexResult<bool> {
        let key = keys::doc_words_key(doc);
        let Some(value) = self.buffer.get(&key)? else {
            return Ok(false);
        };

        for word_id in postings::decode_word_ids(&value)? {
            self.detach(word_id, doc)?;
        }

        self.buffer.delete(&key);
        debug!(doc, "removed document");
        Ok(true)
    }

    /// Drops `doc` from the postings of `word_id`.
    fn detach(&mut self, word_id: u64, doc: u64) -> IndexResult<()> {
        let reverse_key = keys::word_reverse_key(word_id);
        let Some(word) = self.buffer.get(&reverse_key)? else {
            trace!(word_id, doc, "no reverse mapping, skipping");
            return Ok(());
        };
        let Some(value) = self.buffer.get(&word)? else {
            trace!(word_id, doc, "no postings, skipping");
            return Ok(());
        };

        let mut postings = Postings::decode(&value)?;
        postings.remove_doc(doc);

        if postings.is_empty() {
            self.buffer.delete(&word);
            self.buffer.delete(&reverse_key);
            trace!(word_id, "retired word");
        } else {
            self.buffer.put(word, postings.encode());
        }
        Ok(())
    }

    /// Returns true if `doc` is indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn contains_document(&mut self, doc: u64) -> IndexResult<bool> {
        Ok(self.buffer.get(&keys::doc_words_key(doc))?.is_some())
    }
}
