//! Persistent ordered store backed by an append-only batch log.

use crate::batch::WriteBatch;
use crate::error::{StorageError, StorageResult};
use crate::log;
use crate::memory::MemoryStore;
use crate::store::KvStore;
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lock file name inside the store directory.
pub const LOCK_FILE: &str = "LOCK";
/// Batch log file name inside the store directory.
pub const LOG_FILE: &str = "data.log";

/// Options for [`FileStore::open`].
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Create the directory and log if they don't exist.
    pub create_if_missing: bool,
    /// Fail if the log already holds records.
    pub error_if_exists: bool,
    /// `fsync` the log after every batch.
    pub sync_on_write: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            error_if_exists: false,
            sync_on_write: true,
        }
    }
}

/// The open log file and its committed length.
#[derive(Debug)]
struct LogFile {
    file: File,
    len: u64,
    sync_on_write: bool,
}

impl LogFile {
    /// Appends a framed record. On failure the file is cut back to its
    /// previous length so a half-written record never precedes later ones.
    fn append(&mut self, record: &[u8]) -> StorageResult<()> {
        let result = self.write_record(record);
        if result.is_err() {
            if let Err(e) = self.file.set_len(self.len) {
                warn!(error = %e, len = self.len, "failed to roll back partial log append");
            }
        } else {
            self.len += record.len() as u64;
        }
        result
    }

    fn write_record(&mut self, record: &[u8]) -> StorageResult<()> {
        self.file.seek(SeekFrom::Start(self.len))?;
        self.file.write_all(record)?;
        self.file.flush()?;
        if self.sync_on_write {
            self.file.sync_data()?;
        }
        Ok(())
    }
}

/// A persistent ordered key-value store.
///
/// Every [`WriteBatch`] becomes one checksummed record appended to
/// `data.log`; the live view is an in-memory ordered map rebuilt by replaying
/// the log at open. A record that was only partly written when the process
/// died is dropped on the next open, so a batch is either fully present or
/// absent.
///
/// ```text
/// <dir>/
/// ├─ LOCK       # Advisory lock for single-process access
/// └─ data.log   # Append-only batch log
/// ```
///
/// # Example
///
/// ```no_run
/// use lidx_storage::{FileStore, KvStore, StoreOptions};
/// use std::path::Path;
///
/// let store = FileStore::open(Path::new("my_index"), StoreOptions::default()).unwrap();
/// store.put(b"word", b"\x00\x01").unwrap();
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    log: Mutex<LogFile>,
    view: MemoryStore,
    _lock_file: File,
}

impl FileStore {
    /// Opens or creates a store in directory `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory is missing and `create_if_missing` is false (`Missing`)
    /// - The log holds data and `error_if_exists` is true (`AlreadyExists`)
    /// - Another process holds the lock (`Locked`)
    /// - The log is corrupted (`Corrupted`, `ChecksumMismatch`)
    /// - I/O errors occur
    pub fn open(path: &Path, options: StoreOptions) -> StorageResult<Self> {
        if !path.exists() {
            if !options.create_if_missing {
                return Err(StorageError::Missing {
                    path: path.to_path_buf(),
                });
            }
            fs::create_dir_all(path)?;
        }

        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.join(LOCK_FILE))?;
        if lock_file.try_lock_exclusive().is_err() {
            return Err(StorageError::Locked);
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.join(LOG_FILE))?;

        let mut image = Vec::new();
        file.read_to_end(&mut image)?;
        let on_disk = image.len() as u64;

        if options.error_if_exists && on_disk > 0 {
            return Err(StorageError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }

        let replay = log::replay(&image)?;
        if replay.has_torn_tail(on_disk) {
            warn!(
                path = %path.display(),
                valid = replay.valid_len,
                on_disk,
                "discarding torn record at end of log"
            );
            file.set_len(replay.valid_len)?;
            file.sync_all()?;
        }

        let view = MemoryStore::new();
        let records = replay.batches.len();
        for batch in replay.batches {
            view.apply(batch);
        }
        debug!(path = %path.display(), records, keys = view.len(), "opened file store");

        Ok(Self {
            path: path.to_path_buf(),
            log: Mutex::new(LogFile {
                file,
                len: replay.valid_len,
                sync_on_write: options.sync_on_write,
            }),
            view,
            _lock_file: lock_file,
        })
    }

    /// Returns the store directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the batch log in bytes.
    #[must_use]
    pub fn log_len(&self) -> u64 {
        self.log.lock().len
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// Returns true if no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.view.get(key)
    }

    fn write(&self, batch: WriteBatch) -> StorageResult<()> {
        if batch.is_empty() {
            return Ok(());
        }
        let record = log::frame(&batch.encode_payload())?;

        // Hold the log lock while applying so the view follows log order.
        let mut log = self.log.lock();
        log.append(&record)?;
        self.view.apply(batch);
        Ok(())
    }

    fn scan_from(
        &self,
        seek: &[u8],
        visitor: &mut dyn FnMut(&[u8], &[u8]) -> bool,
    ) -> StorageResult<()> {
        self.view.scan_from(seek, visitor)
    }

    fn sync(&self) -> StorageResult<()> {
        self.log.lock().file.sync_all()?;
        Ok(())
    }
}
