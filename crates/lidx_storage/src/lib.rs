//! # lidx Storage
//!
//! Ordered key-value stores for lidx.
//!
//! This crate provides the lowest-level storage abstraction. Stores are
//! **opaque ordered byte maps**: they know nothing about words, postings or
//! document IDs.
//!
//! ## Design Principles
//!
//! - Point reads, atomic batched writes, ordered scans from a seek key
//! - No knowledge of the index key schema
//! - Must be `Send + Sync`
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - For testing and ephemeral indexes
//! - [`FileStore`] - Persistent store over an append-only batch log
//!
//! ## Example
//!
//! ```rust
//! use lidx_storage::{KvStore, MemoryStore, WriteBatch};
//!
//! let store = MemoryStore::new();
//! let mut batch = WriteBatch::new();
//! batch.put(b"hello".to_vec(), b"1".to_vec());
//! batch.put(b"help".to_vec(), b"2".to_vec());
//! store.write(batch).unwrap();
//!
//! let mut keys = Vec::new();
//! store
//!     .scan_from(b"hel", &mut |key, _| {
//!         keys.push(key.to_vec());
//!         true
//!     })
//!     .unwrap();
//! assert_eq!(keys, vec![b"hello".to_vec(), b"help".to_vec()]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod error;
mod file;
mod log;
mod memory;
mod store;

pub use batch::{BatchOp, WriteBatch};
pub use error::{StorageError, StorageResult};
pub use file::{FileStore, StoreOptions, LOCK_FILE, LOG_FILE};
pub use memory::MemoryStore;
pub use store::KvStore;
