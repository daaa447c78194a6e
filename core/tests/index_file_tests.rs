use std::collections::BTreeMap;
use std::fs;

use tempfile::tempdir;
use tse_core::{IndexError, InvertedIndex, MIN_WORD_LEN};

fn contents(idx: &InvertedIndex) -> BTreeMap<String, Vec<(u32, u32)>> {
    idx.iter().map(|(w, c)| (w.to_string(), c.iter().collect())).collect()
}

#[test]
fn file_round_trip_preserves_counts() {
    let mut idx = InvertedIndex::new();
    idx.set_word_doc_count("computer", 1, 4);
    idx.set_word_doc_count("computer", 7, 1);
    idx.set_word_doc_count("science", 7, 12);
    idx.set_word_doc_count("dartmouth", 3, 2);

    let dir = tempdir().unwrap();
    let path = dir.path().join("index.txt");
    idx.save_to_file(&path).unwrap();
    let loaded = InvertedIndex::read_file(&path).unwrap();
    assert_eq!(contents(&loaded), contents(&idx));

    // Saving the loaded copy reproduces the file byte for byte.
    let again = dir.path().join("index2.txt");
    loaded.save_to_file(&again).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), fs::read_to_string(&again).unwrap());
}

#[test]
fn built_index_never_holds_short_words() {
    let mut idx = InvertedIndex::new();
    let text = "A an the of Tse is so fun to use or not";
    for (i, w) in text.split_whitespace().enumerate() {
        idx.add_word(w, (i % 3 + 1) as u32);
    }
    assert!(idx.iter().all(|(w, _)| w.len() >= MIN_WORD_LEN));
    assert_eq!(idx.lookup("the").unwrap().get(3), 1);
    assert_eq!(idx.lookup("tse").unwrap().get(2), 1);
    assert!(idx.lookup("an").is_none());
}

#[test]
fn repeated_adds_count_exactly() {
    let mut idx = InvertedIndex::new();
    for k in 1..=9u32 {
        idx.add_word("playground", 4);
        assert_eq!(idx.lookup("playground").unwrap().get(4), k);
    }
}

#[test]
fn malformed_file_produces_no_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.txt");
    fs::write(&path, "home 1 2\nplayground 2 -1\n").unwrap();
    assert!(matches!(InvertedIndex::read_file(&path), Err(IndexError::Format { line: 2, .. })));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(InvertedIndex::read_file(dir.path().join("nope")), Err(IndexError::Io(_))));
}

#[test]
fn tolerates_blank_lines_and_missing_trailing_newline() {
    let idx = InvertedIndex::deserialize("home 1 2 3 1\n\nhello 2 4".as_bytes()).unwrap();
    assert_eq!(idx.len(), 2);
    assert_eq!(idx.lookup("hello").unwrap().get(2), 4);
}
