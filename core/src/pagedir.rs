use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::frontier::PageStore;
use crate::{DocId, Webpage};

const MARKER: &str = ".crawler";

/// A crawler output directory: one file per page, named by docID, plus a
/// `.crawler` marker file.
///
/// Each page file holds the URL on the first line, the depth on the second
/// and the html after that.
#[derive(Debug, Clone)]
pub struct PageDir {
    pub root: PathBuf,
}

impl PageDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn marker(&self) -> PathBuf { self.root.join(MARKER) }
    fn page(&self, doc_id: DocId) -> PathBuf { self.root.join(doc_id.to_string()) }

    /// Mark an existing directory as crawler output.
    pub fn init(&self) -> Result<(), StoreError> {
        if !self.root.is_dir() {
            return Err(io::Error::new(ErrorKind::NotFound, format!("{} is not a directory", self.root.display())).into());
        }
        File::create(self.marker())?;
        Ok(())
    }

    pub fn is_crawler_directory(&self) -> bool {
        self.marker().is_file()
    }

    pub fn save(&self, page: &Webpage, doc_id: DocId) -> Result<(), StoreError> {
        if doc_id == 0 {
            return Err(StoreError::InvalidDocId(doc_id));
        }
        let html = page.html.as_deref().ok_or_else(|| StoreError::MissingHtml { url: page.url.clone() })?;
        let mut f = File::create(self.page(doc_id))?;
        writeln!(f, "{}", page.url)?;
        writeln!(f, "{}", page.depth)?;
        f.write_all(html.as_bytes())?;
        Ok(())
    }

    /// Load a saved page. `Ok(None)` when there is no file for `doc_id`.
    /// Bytes that are not UTF-8 are replaced, not rejected.
    pub fn load(&self, doc_id: DocId) -> Result<Option<Webpage>, StoreError> {
        if doc_id == 0 {
            return Err(StoreError::InvalidDocId(doc_id));
        }
        let bytes = match fs::read(self.page(doc_id)) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let text = String::from_utf8_lossy(&bytes);
        let mut parts = text.splitn(3, '\n');
        let url = parts.next().unwrap_or_default().trim_end_matches('\r');
        if url.is_empty() {
            return Err(StoreError::Format { doc_id, reason: "missing URL line".into() });
        }
        let depth_line = parts.next().unwrap_or_default().trim();
        let depth = depth_line.parse().map_err(|_| StoreError::Format { doc_id, reason: format!("bad depth {depth_line:?}") })?;
        let html = parts.next().unwrap_or_default();
        Ok(Some(Webpage::with_html(url, depth, html)))
    }

    /// Only the URL line of a saved page.
    pub fn load_url(&self, doc_id: DocId) -> Result<Option<String>, StoreError> {
        if doc_id == 0 {
            return Err(StoreError::InvalidDocId(doc_id));
        }
        let f = match File::open(self.page(doc_id)) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut line = Vec::new();
        BufReader::new(f).read_until(b'\n', &mut line)?;
        Ok(Some(String::from_utf8_lossy(&line).trim_end().to_string()))
    }

    /// Saved pages in docID order, 1, 2, 3, ... up to the first gap.
    pub fn pages(&self) -> Pages<'_> {
        Pages { dir: self, next: 1, done: false }
    }
}

impl PageStore for PageDir {
    fn save(&mut self, page: &Webpage, doc_id: DocId) -> Result<(), StoreError> {
        PageDir::save(self, page, doc_id)
    }
}

pub struct Pages<'a> {
    dir: &'a PageDir,
    next: DocId,
    done: bool,
}

impl Iterator for Pages<'_> {
    type Item = Result<(DocId, Webpage), StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let doc_id = self.next;
        match self.dir.load(doc_id) {
            Ok(Some(page)) => {
                self.next += 1;
                Some(Ok((doc_id, page)))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_requires_existing_directory() {
        let tmp = tempdir().unwrap();
        let missing = PageDir::new(tmp.path().join("nope"));
        assert!(missing.init().is_err());
        assert!(!missing.is_crawler_directory());

        let dir = PageDir::new(tmp.path());
        assert!(!dir.is_crawler_directory());
        dir.init().unwrap();
        assert!(dir.is_crawler_directory());
    }

    #[test]
    fn save_then_load() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path());
        let page = Webpage::with_html("http://cs50tse.cs.dartmouth.edu/tse/", 2, "<html>\nline two\n</html>\n");
        dir.save(&page, 1).unwrap();

        let raw = fs::read_to_string(tmp.path().join("1")).unwrap();
        assert!(raw.starts_with("http://cs50tse.cs.dartmouth.edu/tse/\n2\n<html>"));

        assert_eq!(dir.load(1).unwrap(), Some(page));
        assert_eq!(dir.load_url(1).unwrap().as_deref(), Some("http://cs50tse.cs.dartmouth.edu/tse/"));
        assert_eq!(dir.load(2).unwrap(), None);
        assert_eq!(dir.load_url(2).unwrap(), None);
    }

    #[test]
    fn rejects_doc_zero_and_unfetched_pages() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path());
        let fetched = Webpage::with_html("http://x/", 0, "");
        assert!(matches!(dir.save(&fetched, 0), Err(StoreError::InvalidDocId(0))));
        assert!(matches!(dir.save(&Webpage::new("http://x/", 0), 1), Err(StoreError::MissingHtml { .. })));
    }

    #[test]
    fn bad_depth_is_format_error() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("1"), "http://x/\ndeep\n<html/>").unwrap();
        let dir = PageDir::new(tmp.path());
        assert!(matches!(dir.load(1), Err(StoreError::Format { doc_id: 1, .. })));
    }

    #[test]
    fn latin1_page_loads_lossily() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("1"), b"http://x/caf\xe9\n0\n<p>caf\xe9 search engine</p>").unwrap();
        let dir = PageDir::new(tmp.path());
        let page = dir.load(1).unwrap().unwrap();
        assert_eq!(page.url, "http://x/caf\u{FFFD}");
        assert_eq!(page.html(), "<p>caf\u{FFFD} search engine</p>");
        assert_eq!(page.words().collect::<Vec<_>>(), vec!["caf", "search", "engine"]);
        assert_eq!(dir.load_url(1).unwrap().as_deref(), Some("http://x/caf\u{FFFD}"));
        assert!(matches!(dir.pages().collect::<Vec<_>>().as_slice(), [Ok((1, _))]));
    }

    #[test]
    fn pages_stop_at_first_gap() {
        let tmp = tempdir().unwrap();
        let dir = PageDir::new(tmp.path());
        for id in [1, 2, 4] {
            dir.save(&Webpage::with_html(format!("http://x/{id}"), 0, "hi"), id).unwrap();
        }
        let ids: Vec<DocId> = dir.pages().map(|r| r.unwrap().0).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
