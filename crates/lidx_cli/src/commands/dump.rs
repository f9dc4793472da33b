//! Dump command implementation.

use super::open;
use lidx_core::Entry;
use serde::Serialize;
use std::path::Path;

/// Stored entry representation for output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryInfo {
    /// The word counter.
    Counter {
        /// Id the next new word will receive.
        next_word_id: u64,
    },
    /// Word ids of a document.
    DocWords {
        /// Document id.
        doc: u64,
        /// Word ids.
        word_ids: Vec<u64>,
    },
    /// Word id to word.
    WordReverse {
        /// Word id.
        word_id: u64,
        /// The word.
        word: String,
    },
    /// Postings of a word.
    Postings {
        /// The word.
        word: String,
        /// Word id.
        word_id: u64,
        /// Documents containing the word.
        docs: Vec<u64>,
    },
}

impl From<Entry> for EntryInfo {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Counter { next_word_id } => Self::Counter { next_word_id },
            Entry::DocWords { doc, word_ids } => Self::DocWords { doc, word_ids },
            Entry::WordReverse { word_id, word } => Self::WordReverse { word_id, word },
            Entry::Postings { word, postings } => Self::Postings {
                word,
                word_id: postings.word_id,
                docs: postings.docs,
            },
        }
    }
}

/// Runs the dump command.
pub fn run(path: &Path, limit: Option<usize>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut index = open(path, false)?;
    let entries: Vec<EntryInfo> = index
        .entries()?
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(EntryInfo::from)
        .collect();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        _ => {
            print_text_output(&entries);
        }
    }

    Ok(())
}

fn print_text_output(entries: &[EntryInfo]) {
    for entry in entries {
        match entry {
            EntryInfo::Counter { next_word_id } => {
                println!("counter       next={next_word_id}");
            }
            EntryInfo::DocWords { doc, word_ids } => {
                println!("doc-words     doc={doc} words={word_ids:?}");
            }
            EntryInfo::WordReverse { word_id, word } => {
                println!("word-reverse  id={word_id} word={word}");
            }
            EntryInfo::Postings {
                word,
                word_id,
                docs,
            } => {
                println!("postings      word={word} id={word_id} docs={docs:?}");
            }
        }
    }
    println!("{} entries", entries.len());
}
