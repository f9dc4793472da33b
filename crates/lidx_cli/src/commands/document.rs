//! Document commands: set, set-file, remove.

use super::open;
use std::path::Path;
use tracing::info;

/// Indexes `text` as `doc`.
pub fn set(path: &Path, doc: u64, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open(path, true)?;
    let words = index.set_document(doc, text)?;
    index.close()?;
    info!(doc, words, "document indexed");
    Ok(())
}

/// Indexes the contents of `file` as `doc`.
pub fn set_file(path: &Path, doc: u64, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    set(path, doc, &text)
}

/// Removes `doc`.
pub fn remove(path: &Path, doc: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open(path, false)?;
    let removed = index.remove_document(doc)?;
    index.close()?;
    if removed {
        info!(doc, "document removed");
    } else {
        info!(doc, "document not indexed");
    }
    Ok(())
}
