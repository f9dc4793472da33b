//! # lidx core
//!
//! Embedded full-text indexing over an ordered key-value store.
//!
//! Documents are identified by caller-assigned `u64` ids. Their text is split
//! into words, each word folded to a lowercase, accent-free form, and an
//! inverted index is kept in the store:
//!
//! | key                    | value                         |
//! |------------------------|-------------------------------|
//! | `.`                    | next word id                  |
//! | `,` varint(doc)        | varint word ids of the doc    |
//! | `/` varint(word id)    | the word                      |
//! | the word               | varint(word id) varint(doc).. |
//!
//! Words are then found by prefix, substring or suffix.
//!
//! ## Crate layout
//!
//! - [`Index`]: the public handle
//! - [`Normalizer`]: word segmentation and folding
//! - [`WriteBuffer`]: batches mutations into atomic flushes
//! - [`Indexer`]: add/remove bookkeeping over the buffer
//! - [`search`]: key-space scans
//!
//! Storage lives in `lidx_storage`; varints in `lidx_codec`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod config;
mod error;
mod index;
mod indexer;
pub mod inspect;
pub mod keys;
mod normalizer;
pub mod postings;
pub mod search;

#[cfg(test)]
mod testing;

pub use buffer::WriteBuffer;
pub use config::Config;
pub use error::{ErrorKind, IndexError, IndexResult};
pub use index::Index;
pub use indexer::{Indexer, WordResolution};
pub use inspect::{Entry, IndexStats};
pub use keys::KeyClass;
pub use normalizer::{Normalizer, Segment};
pub use postings::Postings;
pub use search::{ParseSearchKindError, SearchKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
