//! Search command implementation.

use super::open;
use lidx_core::SearchKind;
use serde::Serialize;
use std::path::Path;

/// Search result for output.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    /// The token as given.
    pub token: String,
    /// Match mode.
    pub kind: String,
    /// Matching documents, ascending.
    pub documents: Vec<u64>,
}

/// Runs the search command.
pub fn run(
    path: &Path,
    token: &str,
    kind: SearchKind,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open(path, false)?;
    let output = SearchOutput {
        token: token.to_string(),
        kind: kind.to_string(),
        documents: index.search(token, kind)?,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            for doc in &output.documents {
                println!("{doc}");
            }
        }
    }

    Ok(())
}
