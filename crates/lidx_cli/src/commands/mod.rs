//! CLI command implementations.

pub mod document;
pub mod dump;
pub mod inspect;
pub mod search;

use lidx_core::{Config, Index, Normalizer};
use std::path::Path;
use std::sync::Arc;

/// Opens the index at `path`, creating it only when `create` is set.
///
/// Without `create`, a directory that holds no log is rejected before the
/// store is opened, so read-only commands leave it untouched.
fn open(path: &Path, create: bool) -> Result<Index, Box<dyn std::error::Error>> {
    if !create && !path.join(lidx_storage::LOG_FILE).exists() {
        return Err(format!("No index found at {:?}", path).into());
    }

    let config = Config::new().create_if_missing(create);
    Ok(Index::open_with_config(
        path,
        config,
        Arc::new(Normalizer::new()),
    )?)
}
