//! Inspect command implementation.

use super::open;
use serde::Serialize;
use std::path::Path;

/// Index inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Index path.
    pub path: String,
    /// Log file size in bytes.
    pub log_size: u64,
    /// Number of live words.
    pub words: u64,
    /// Number of indexed documents.
    pub documents: u64,
    /// Id the next new word will receive.
    pub next_word_id: u64,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open(path, false)?;
    let log_path = path.join(lidx_storage::LOG_FILE);
    let stats = index.stats()?;
    let result = InspectResult {
        path: path.display().to_string(),
        log_size: std::fs::metadata(&log_path)?.len(),
        words: stats.words,
        documents: stats.documents,
        next_word_id: stats.next_word_id,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult) {
    println!("lidx Index Inspection");
    println!("=====================");
    println!();
    println!("Path: {}", result.path);
    println!("Log size: {}", format_size(result.log_size));
    println!();
    println!("Contents:");
    println!("  Documents:    {}", result.documents);
    println!("  Words:        {}", result.words);
    println!("  Next word id: {}", result.next_word_id);
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn missing_index() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), "text").is_err());
    }
}
