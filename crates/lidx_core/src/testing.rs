//! Store wrappers for unit tests.

use lidx_storage::{KvStore, MemoryStore, StorageError, StorageResult, WriteBatch};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// A [`MemoryStore`] whose writes and reads can be made to fail on demand.
#[derive(Debug, Default)]
pub struct FailingStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    write_calls: AtomicUsize,
    last_batch_len: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub fn last_batch_len(&self) -> usize {
        self.last_batch_len.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    fn injected() -> StorageError {
        StorageError::Io(io::Error::new(io::ErrorKind::Other, "injected failure"))
    }
}

impl KvStore for FailingStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.get(key)
    }

    fn write(&self, batch: WriteBatch) -> StorageResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.last_batch_len.store(batch.len(), Ordering::SeqCst);
        self.inner.write(batch)
    }

    fn scan_from(
        &self,
        seek: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> bool,
    ) -> StorageResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.scan_from(seek, visitor)
    }

    fn sync(&self) -> StorageResult<()> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        Ok(())
    }
}
