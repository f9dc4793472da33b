//! In-memory ordered store.

use crate::batch::{BatchOp, WriteBatch};
use crate::error::StorageResult;
use crate::store::KvStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

/// An in-memory ordered key-value store.
///
/// Suitable for:
/// - Unit and integration tests
/// - Ephemeral indexes that don't need persistence
///
/// [`crate::FileStore`] also keeps its live view in one of these.
///
/// # Example
///
/// ```rust
/// use lidx_storage::{KvStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.put(b"apple", b"1").unwrap();
/// assert_eq!(store.get(b"apple").unwrap(), Some(b"1".to_vec()));
/// assert_eq!(store.get(b"pear").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns a copy of every key in order.
    #[must_use]
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.entries.read().keys().cloned().collect()
    }

    /// Applies a batch in memory. Infallible.
    pub(crate) fn apply(&self, batch: WriteBatch) {
        let mut entries = self.entries.write();
        for op in batch {
            match op {
                BatchOp::Put { key, value } => {
                    entries.insert(key, value);
                }
                BatchOp::Delete { key } => {
                    entries.remove(&key);
                }
            }
        }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, batch: WriteBatch) -> StorageResult<()> {
        self.apply(batch);
        Ok(())
    }

    fn scan_from(
        &self,
        seek: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> bool,
    ) -> StorageResult<()> {
        let entries = self.entries.read();
        for (key, value) in entries.range::<[u8], _>((Bound::Included(seek), Bound::Unbounded)) {
            if !visitor(key, value) {
                break;
            }
        }
        Ok(())
    }

    fn sync(&self) -> StorageResult<()> {
        // Nothing to make durable
        Ok(())
    }
}
