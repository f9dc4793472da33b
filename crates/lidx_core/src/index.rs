//! The public index handle.

use crate::buffer::WriteBuffer;
use crate::config::Config;
use crate::error::IndexResult;
use crate::indexer::Indexer;
use crate::inspect::{self, Entry, IndexStats};
use crate::normalizer::Normalizer;
use crate::search::{self, SearchKind};
use lidx_storage::{FileStore, KvStore};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// An embedded full-text index.
///
/// Mutations are buffered in memory and reach the store on [`Index::flush`],
/// on every search, on [`Index::close`], and (best effort) on drop. Each
/// flush is one atomic batch.
///
/// `Index` is not internally synchronized; mutating calls take `&mut self`.
///
/// # Example
///
/// ```
/// use lidx_core::{Index, Normalizer, SearchKind};
/// use lidx_storage::MemoryStore;
/// use std::sync::Arc;
///
/// let normalizer = Arc::new(Normalizer::new());
/// let mut index = Index::with_store(Arc::new(MemoryStore::new()), normalizer);
///
/// index.set_document(1, "hello world")?;
/// index.set_document(2, "help desk")?;
///
/// assert_eq!(index.search("hel", SearchKind::Prefix)?, vec![1, 2]);
/// assert_eq!(index.search("lp", SearchKind::Suffix)?, vec![2]);
/// # Ok::<(), lidx_core::IndexError>(())
/// ```
pub struct Index {
    buffer: WriteBuffer,
    normalizer: Arc<Normalizer>,
    config: Config,
}

impl Index {
    /// Opens or creates an index stored in the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or is locked by
    /// another process.
    pub fn open(path: impl AsRef<Path>, normalizer: Arc<Normalizer>) -> IndexResult<Self> {
        Self::open_with_config(path, Config::default(), normalizer)
    }

    /// Opens an index with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened, is locked, or
    /// conflicts with `create_if_missing` / `error_if_exists`.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: Config,
        normalizer: Arc<Normalizer>,
    ) -> IndexResult<Self> {
        let path = path.as_ref();
        let store = FileStore::open(path, config.store_options())?;
        debug!(path = %path.display(), entries = store.len(), "opened index");
        Ok(Self {
            buffer: WriteBuffer::new(Arc::new(store)),
            normalizer,
            config,
        })
    }

    /// Creates an index over an existing store.
    pub fn with_store(store: Arc<dyn KvStore>, normalizer: Arc<Normalizer>) -> Self {
        Self::with_store_and_config(store, Config::default(), normalizer)
    }

    /// Creates an index over an existing store with custom configuration.
    ///
    /// Only `sync_on_flush` applies; the open flags concern directories.
    pub fn with_store_and_config(
        store: Arc<dyn KvStore>,
        config: Config,
        normalizer: Arc<Normalizer>,
    ) -> Self {
        Self {
            buffer: WriteBuffer::new(store),
            normalizer,
            config,
        }
    }

    /// The configuration this index was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The normalizer used for documents and queries.
    pub fn normalizer(&self) -> &Arc<Normalizer> {
        &self.normalizer
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        self.buffer.store()
    }

    /// Returns true if no mutations are waiting to be flushed.
    pub fn is_clean(&self) -> bool {
        self.buffer.is_clean()
    }

    /// Commits all buffered mutations as one batch.
    ///
    /// On failure the mutations stay buffered and a later flush retries them.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the batch.
    pub fn flush(&mut self) -> IndexResult<()> {
        self.buffer.flush()?;
        Ok(())
    }

    /// Flushes and closes the index.
    ///
    /// When flushes do not sync, the store is synced once here instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the final flush or sync fails.
    pub fn close(mut self) -> IndexResult<()> {
        self.flush()?;
        if !self.config.sync_on_flush {
            self.buffer.store().sync()?;
        }
        Ok(())
    }

    /// Indexes `text` as the full content of `doc`, replacing earlier content.
    ///
    /// Returns the number of distinct words indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails. Mutations buffered before the
    /// failure are kept; calling again with the same arguments converges.
    pub fn set_document(&mut self, doc: u64, text: &str) -> IndexResult<usize> {
        Indexer::new(&mut self.buffer, &self.normalizer).set_document(doc, text)
    }

    /// Indexes UTF-16 `text`. Unpaired surrogates become U+FFFD.
    ///
    /// # Errors
    ///
    /// See [`Index::set_document`].
    pub fn set_document_utf16(&mut self, doc: u64, text: &[u16]) -> IndexResult<usize> {
        self.set_document(doc, &decode_utf16_lossy(text))
    }

    /// Removes `doc`. Returns false if it was not indexed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn remove_document(&mut self, doc: u64) -> IndexResult<bool> {
        Indexer::new(&mut self.buffer, &self.normalizer).remove_document(doc)
    }

    /// Returns true if `doc` is indexed, counting buffered mutations.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn contains_document(&mut self, doc: u64) -> IndexResult<bool> {
        Indexer::new(&mut self.buffer, &self.normalizer).contains_document(doc)
    }

    /// Finds documents with a word matching `token`.
    ///
    /// Flushes first, so buffered mutations are visible. The token is
    /// trimmed and folded like document text; it is not split into words.
    ///
    /// # Errors
    ///
    /// Returns a normalization error if the token folds to nothing, or a
    /// store error if the flush or scan fails.
    pub fn search(&mut self, token: &str, kind: SearchKind) -> IndexResult<Vec<u64>> {
        self.flush()?;
        let token = self.normalizer.transliterate(token.trim())?;
        search::scan(self.buffer.store().as_ref(), &token, kind)
    }

    /// Like [`Index::search`] with a UTF-16 token.
    ///
    /// # Errors
    ///
    /// See [`Index::search`].
    pub fn search_utf16(&mut self, token: &[u16], kind: SearchKind) -> IndexResult<Vec<u64>> {
        self.search(&decode_utf16_lossy(token), kind)
    }

    /// Counts words and documents, after flushing.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or scan fails.
    pub fn stats(&mut self) -> IndexResult<IndexStats> {
        self.flush()?;
        inspect::stats(self.buffer.store().as_ref())
    }

    /// Every stored entry, decoded, after flushing.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush or scan fails.
    pub fn entries(&mut self) -> IndexResult<Vec<Entry>> {
        self.flush()?;
        inspect::entries(self.buffer.store().as_ref())
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        if let Err(err) = self.buffer.flush() {
            warn!(error = %err, "failed to flush index on drop");
        }
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("config", &self.config)
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

fn decode_utf16_lossy(units: &[u16]) -> String {
    char::decode_utf16(units.iter().copied())
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
