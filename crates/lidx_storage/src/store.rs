//! Ordered key-value store trait.

use crate::batch::WriteBatch;
use crate::error::StorageResult;

/// An ordered byte-string key-value store.
///
/// Keys are compared bytewise. Stores do not interpret keys or values; the
/// index layer owns the key schema.
///
/// # Invariants
///
/// - `get` observes every batch for which `write` returned `Ok`
/// - `write` applies a batch entirely or not at all
/// - `scan_from` visits keys in ascending bytewise order
/// - Stores must be `Send + Sync`; they guard their own state
///
/// # Implementors
///
/// - [`super::MemoryStore`] - For testing and ephemeral indexes
/// - [`super::FileStore`] - For persistent indexes
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself fails.
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Applies every operation of `batch` atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch could not be made durable. In that case
    /// none of its operations are visible.
    fn write(&self, batch: WriteBatch) -> StorageResult<()>;

    /// Visits entries in key order, starting at the first key `>= seek`.
    ///
    /// The visitor returns `true` to continue and `false` to stop.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails while iterating.
    fn scan_from(
        &self,
        seek: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> bool,
    ) -> StorageResult<()>;

    /// Makes previously written batches durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&self) -> StorageResult<()>;

    /// Stores a single value.
    ///
    /// # Errors
    ///
    /// See [`KvStore::write`].
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let mut batch = WriteBatch::new();
        batch.put(key.to_vec(), value.to_vec());
        self.write(batch)
    }

    /// Removes a single key. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// See [`KvStore::write`].
    fn delete(&self, key: &[u8]) -> StorageResult<()> {
        let mut batch = WriteBatch::new();
        batch.delete(key.to_vec());
        self.write(batch)
    }
}
