//! Buffered writes over a [`KvStore`].

use lidx_storage::{KvStore, StorageResult, WriteBatch};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Batches mutations in memory and commits them atomically.
///
/// Reads see pending state first, so a `put` is always visible to a later
/// `get` on the same buffer whether or not a flush happened in between.
/// Values read from the store are cached; cached entries are not written back
/// unless they are modified.
///
/// # Flush semantics
///
/// [`WriteBuffer::flush`] turns every dirty key into a put and every pending
/// delete into a delete, and hands the store a single [`WriteBatch`]. If the
/// store rejects it, the pending state is left untouched so a later flush
/// retries the same mutations.
pub struct WriteBuffer {
    store: Arc<dyn KvStore>,
    /// Latest known value per key: pending writes plus read-through cache.
    values: HashMap<Vec<u8>, Vec<u8>>,
    /// Keys whose value in `values` must be written on flush.
    dirty: BTreeSet<Vec<u8>>,
    /// Keys to delete on flush.
    deleted: BTreeSet<Vec<u8>>,
}

impl WriteBuffer {
    /// Creates an empty buffer over `store`.
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self {
            store,
            values: HashMap::new(),
            dirty: BTreeSet::new(),
            deleted: BTreeSet::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Reads `key`, consulting pending state before the store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store read fails. A missing key is
    /// `Ok(None)`.
    pub fn get(&mut self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        if self.deleted.contains(key) {
            return Ok(None);
        }
        if let Some(value) = self.values.get(key) {
            return Ok(Some(value.clone()));
        }

        let value = self.store.get(key)?;
        if let Some(value) = &value {
            self.values.insert(key.to_vec(), value.clone());
        }
        Ok(value)
    }

    /// Queues a write of `value` under `key`.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.deleted.remove(&key);
        self.dirty.insert(key.clone());
        self.values.insert(key, value);
    }

    /// Queues a delete of `key`.
    pub fn delete(&mut self, key: &[u8]) {
        self.values.remove(key);
        self.dirty.remove(key);
        self.deleted.insert(key.to_vec());
    }

    /// Commits all pending mutations in one atomic batch.
    ///
    /// Does nothing when there is nothing to commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the batch; nothing is committed
    /// and the pending mutations are kept.
    pub fn flush(&mut self) -> StorageResult<()> {
        if self.is_clean() {
            return Ok(());
        }

        let mut batch = WriteBatch::new();
        for key in &self.dirty {
            if let Some(value) = self.values.get(key) {
                batch.put(key.clone(), value.clone());
            }
        }
        for key in &self.deleted {
            batch.delete(key.clone());
        }

        let puts = self.dirty.len();
        let deletes = self.deleted.len();
        self.store.write(batch)?;
        debug!(puts, deletes, "flushed write buffer");

        self.dirty.clear();
        self.deleted.clear();
        Ok(())
    }

    /// Returns true if nothing awaits a flush.
    pub fn is_clean(&self) -> bool {
        self.dirty.is_empty() && self.deleted.is_empty()
    }

    /// Number of keys awaiting a put.
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Number of keys awaiting a delete.
    pub fn pending_delete_len(&self) -> usize {
        self.deleted.len()
    }
}

impl std::fmt::Debug for WriteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriteBuffer")
            .field("cached", &self.values.len())
            .field("dirty", &self.dirty.len())
            .field("deleted", &self.deleted.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FailingStore;
    use lidx_storage::MemoryStore;

    fn buffer() -> (Arc<MemoryStore>, WriteBuffer) {
        let store = Arc::new(MemoryStore::new());
        let buffer = WriteBuffer::new(store.clone());
        (store, buffer)
    }

    #[test]
    fn put_then_get_without_flush() {
        let (store, mut buffer) = buffer();
        buffer.put(b"k".to_vec(), b"v".to_vec());

        assert_eq!(buffer.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.get(b"k").unwrap(), None);
    }

    #[test]
    fn put_then_get_after_flush() {
        let (store, mut buffer) = buffer();
        buffer.put(b"k".to_vec(), b"v".to_vec());
        buffer.flush().unwrap();

        assert!(buffer.is_clean());
        assert_eq!(buffer.get(b"k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn get_reads_through_without_dirtying() {
        let (store, mut buffer) = buffer();
        store.put(b"k", b"stored").unwrap();

        assert_eq!(buffer.get(b"k").unwrap(), Some(b"stored".to_vec()));
        assert!(buffer.is_clean());
        assert_eq!(buffer.get(b"missing").unwrap(), None);
    }

    #[test]
    fn delete_hides_store_value() {
        let (store, mut buffer) = buffer();
        store.put(b"k", b"stored").unwrap();

        buffer.delete(b"k");
        assert_eq!(buffer.get(b"k").unwrap(), None);
        assert_eq!(buffer.pending_delete_len(), 1);

        buffer.flush().unwrap();
        assert_eq!(store.get(b"k").unwrap(), None);
    }

    #[test]
    fn put_after_delete_revives_key() {
        let (store, mut buffer) = buffer();
        store.put(b"k", b"old").unwrap();

        buffer.delete(b"k");
        buffer.put(b"k".to_vec(), b"new".to_vec());
        assert_eq!(buffer.pending_delete_len(), 0);
        buffer.flush().unwrap();

        assert_eq!(store.get(b"k").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn delete_after_put_drops_pending_write() {
        let (store, mut buffer) = buffer();
        buffer.put(b"k".to_vec(), b"v".to_vec());
        buffer.delete(b"k");
        assert_eq!(buffer.dirty_len(), 0);

        buffer.flush().unwrap();
        assert_eq!(store.get(b"k").unwrap(), None);
    }

    #[test]
    fn flush_of_clean_buffer_skips_store() {
        let store = Arc::new(FailingStore::new());
        store.fail_writes(true);
        let mut buffer = WriteBuffer::new(store.clone());

        assert!(buffer.flush().is_ok());
        assert_eq!(store.write_calls(), 0);
    }

    #[test]
    fn failed_flush_keeps_pending_state() {
        let store = Arc::new(FailingStore::new());
        let mut buffer = WriteBuffer::new(store.clone());
        buffer.put(b"a".to_vec(), b"1".to_vec());
        buffer.delete(b"b");

        store.fail_writes(true);
        assert!(buffer.flush().is_err());
        assert_eq!(buffer.dirty_len(), 1);
        assert_eq!(buffer.pending_delete_len(), 1);
        assert_eq!(store.get(b"a").unwrap(), None);

        store.fail_writes(false);
        buffer.flush().unwrap();
        assert!(buffer.is_clean());
        assert_eq!(store.get(b"a").unwrap(), Some(b"1".to_vec()));
    }

    #[test]
    fn flush_sends_one_batch() {
        let store = Arc::new(FailingStore::new());
        let mut buffer = WriteBuffer::new(store.clone());
        for i in 0..10u8 {
            buffer.put(vec![b'k', i], vec![i]);
        }
        buffer.delete(b"gone");
        buffer.flush().unwrap();

        assert_eq!(store.write_calls(), 1);
        assert_eq!(store.last_batch_len(), 11);
    }
}
