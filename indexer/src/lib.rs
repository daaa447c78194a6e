use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use tse_core::{DocId, InvertedIndex, PageDir, StoreError, Webpage};

/// Index every page of `pages`, docID 1 onward, stopping at the first
/// missing document.
pub fn index_build(pages: &PageDir) -> Result<InvertedIndex, StoreError> {
    let mut idx = InvertedIndex::new();
    for page in pages.pages() {
        let (doc_id, page) = page?;
        index_page(&mut idx, &page, doc_id);
        tracing::debug!(doc_id, url = %page.url, "indexed");
    }
    Ok(idx)
}

pub fn index_page(idx: &mut InvertedIndex, page: &Webpage, doc_id: DocId) {
    for word in page.words() {
        idx.add_word(&word, doc_id);
    }
}

/// Whether `path` can be opened for writing, creating it if needed. An
/// existing file's contents are left alone.
pub fn check_writable(path: &Path) -> io::Result<()> {
    OpenOptions::new().write(true).create(true).truncate(false).open(path)?;
    Ok(())
}
