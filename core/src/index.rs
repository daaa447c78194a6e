use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::IndexError;
use crate::word::normalize_word;
use crate::Counter;

pub type DocId = u32;

/// Words shorter than this are never stored.
pub const MIN_WORD_LEN: usize = 3;

const DEFAULT_CAPACITY: usize = 500;

/// Maps each normalized word to the documents it appears in and how many
/// times it appears there.
///
/// On disk an index is a text file with one line per word:
///
/// ```text
/// word docID count [docID count]...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    words: HashMap<String, Counter>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self { words: HashMap::with_capacity(DEFAULT_CAPACITY) }
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty index with room for about `hint` words. Fails instead of
    /// aborting when the storage cannot be allocated.
    pub fn with_capacity(hint: usize) -> Result<Self, IndexError> {
        let mut words = HashMap::new();
        words.try_reserve(hint)?;
        Ok(Self { words })
    }

    /// Record one occurrence of `word` in `doc_id`. Words shorter than
    /// [`MIN_WORD_LEN`] and docID 0 are ignored.
    pub fn add_word(&mut self, word: &str, doc_id: DocId) {
        if let Some(counter) = self.counter_for(word, doc_id) {
            counter.add(doc_id);
        }
    }

    /// Like [`add_word`](Self::add_word) but stores an exact count.
    pub fn set_word_doc_count(&mut self, word: &str, doc_id: DocId, count: u32) {
        if let Some(counter) = self.counter_for(word, doc_id) {
            counter.set(doc_id, count);
        }
    }

    fn counter_for(&mut self, word: &str, doc_id: DocId) -> Option<&mut Counter> {
        if word.len() < MIN_WORD_LEN || doc_id == 0 {
            return None;
        }
        let mut word = word.to_string();
        normalize_word(&mut word);
        Some(self.words.entry(word).or_default())
    }

    /// Counter for `word`, matched the way [`add_word`](Self::add_word)
    /// stores it, so case does not matter.
    pub fn lookup(&self, word: &str) -> Option<&Counter> {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            let mut word = word.to_string();
            normalize_word(&mut word);
            return self.words.get(&word);
        }
        self.words.get(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Counter)> {
        self.words.iter().map(|(w, c)| (w.as_str(), c))
    }

    /// Write the index in the text format, one line per word. Lines are
    /// sorted by word so repeated saves of the same index are identical.
    pub fn serialize<W: Write>(&self, mut writer: W) -> Result<(), IndexError> {
        let mut entries: Vec<_> = self.iter().filter(|(_, c)| !c.is_empty()).collect();
        entries.sort_unstable_by_key(|(word, _)| *word);
        for (word, counter) in entries {
            write!(writer, "{word}")?;
            for (doc_id, count) in counter.iter() {
                write!(writer, " {doc_id} {count}")?;
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Parse an index written by [`serialize`](Self::serialize). Any bad
    /// docID or count fails the whole read.
    pub fn deserialize<R: Read>(mut reader: R) -> Result<Self, IndexError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let lines = text.lines().count();
        let mut idx = Self::with_capacity(lines + lines / 2)?;

        for (lineno, line) in text.lines().enumerate() {
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            while let Some(doc_field) = fields.next() {
                let doc_id = parse_field(doc_field, lineno + 1)?;
                let count = match fields.next() {
                    Some(count_field) => parse_field(count_field, lineno + 1)?,
                    None => {
                        return Err(IndexError::Format { line: lineno + 1, token: doc_field.to_string() })
                    }
                };
                idx.set_word_doc_count(word, doc_id, count);
            }
        }
        Ok(idx)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), IndexError> {
        let f = File::create(path)?;
        self.serialize(BufWriter::new(f))
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, IndexError> {
        let f = File::open(path)?;
        Self::deserialize(f)
    }
}

fn parse_field(token: &str, line: usize) -> Result<u32, IndexError> {
    token.parse().map_err(|_| IndexError::Format { line, token: token.to_string() })
}
