//! Index behaviour across reopen of a file-backed store.

use lidx_core::{Config, ErrorKind, Index, Normalizer, SearchKind};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn normalizer() -> Arc<Normalizer> {
    Arc::new(Normalizer::new())
}

fn append(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(bytes).unwrap();
}

#[test]
fn contents_survive_reopen() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(1, "hello world").unwrap();
        index.set_document(2, "help desk").unwrap();
        index.close().unwrap();
    }

    let mut index = Index::open(dir.path(), normalizer()).unwrap();
    assert_eq!(index.search("hel", SearchKind::Prefix).unwrap(), vec![1, 2]);
    assert_eq!(index.stats().unwrap().documents, 2);
}

#[test]
fn drop_flushes_to_disk() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(9, "dropped").unwrap();
    }

    let mut index = Index::open(dir.path(), normalizer()).unwrap();
    assert_eq!(index.search("drop", SearchKind::Prefix).unwrap(), vec![9]);
}

#[test]
fn word_counter_persists() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(1, "first").unwrap();
        index.remove_document(1).unwrap();
        index.close().unwrap();
    }

    let mut index = Index::open(dir.path(), normalizer()).unwrap();
    index.set_document(2, "second").unwrap();
    assert_eq!(index.stats().unwrap().next_word_id, 2);
}

#[test]
fn second_open_is_locked_out() {
    let dir = tempdir().unwrap();
    let _index = Index::open(dir.path(), normalizer()).unwrap();

    let err = Index::open(dir.path(), normalizer()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreFailure);
}

#[test]
fn missing_directory_without_create() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent");
    let config = Config::new().create_if_missing(false);

    assert!(Index::open_with_config(&path, config, normalizer()).is_err());
    assert!(!path.exists());
}

#[test]
fn existing_index_with_error_if_exists() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(1, "present").unwrap();
    }

    let config = Config::new().error_if_exists(true);
    assert!(Index::open_with_config(dir.path(), config, normalizer()).is_err());
}

#[test]
fn torn_tail_is_discarded() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(1, "durable").unwrap();
    }
    append(&dir.path().join("data.log"), b"LID");

    let mut index = Index::open(dir.path(), normalizer()).unwrap();
    assert_eq!(index.search("durable", SearchKind::Prefix).unwrap(), vec![1]);

    index.set_document(2, "after").unwrap();
    index.close().unwrap();

    let mut index = Index::open(dir.path(), normalizer()).unwrap();
    assert_eq!(index.search("after", SearchKind::Prefix).unwrap(), vec![2]);
}

#[test]
fn checksum_mismatch_refuses_to_open() {
    let dir = tempdir().unwrap();
    {
        let mut index = Index::open(dir.path(), normalizer()).unwrap();
        index.set_document(1, "fragile").unwrap();
    }

    let log = dir.path().join("data.log");
    let mut bytes = std::fs::read(&log).unwrap();
    // First payload byte, just past the record header.
    bytes[10] ^= 0xff;
    std::fs::write(&log, bytes).unwrap();

    let err = Index::open(dir.path(), normalizer()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::StoreFailure);
}
