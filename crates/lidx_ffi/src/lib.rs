//! # lidx FFI
//!
//! Stable C ABI for the lidx full-text index.
//!
//! This crate provides:
//! - An opaque index handle with open/close/flush
//! - UTF-8 and UTF-16 entry points for indexing and search
//! - Result codes plus a per-thread last-error message
//! - Ownership rules for returned document id arrays
//!
//! # Memory ownership
//!
//! Handles come from `lidx_new` and go back through `lidx_free`. Document id
//! arrays returned by `lidx_search` / `lidx_u_search` are owned by the
//! caller and released with `lidx_free_docids`. Strings passed in are only
//! borrowed for the duration of the call.
//!
//! # Threads
//!
//! A handle must not be used from two threads at once. All handles share
//! one process-wide normalizer, created on first use.

#![warn(missing_docs)]

mod error;
mod index;
mod normalizer;
mod types;

pub use error::{lidx_clear_error, lidx_get_last_error, LidxResult};
pub use index::{
    lidx_close, lidx_flush, lidx_free, lidx_free_docids, lidx_new, lidx_open, lidx_remove,
    lidx_search, lidx_set, lidx_u_search, lidx_u_set, lidx_version,
};
pub use normalizer::shared_normalizer;
pub use types::{LidxHandle, LidxSearchKind};
