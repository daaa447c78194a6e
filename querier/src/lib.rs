use std::io::{self, BufRead, Write};

use serde::Serialize;
use tse_core::{rank, DocId, InvertedIndex, PageDir, Query};

const SEPARATOR: &str = "-----------------------------------------------";

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: u32,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per query line.
    Json,
}

/// Answers queries against one index and the page directory it was built from.
pub struct Querier {
    index: InvertedIndex,
    pages: PageDir,
    format: OutputFormat,
}

impl Querier {
    pub fn new(index: InvertedIndex, pages: PageDir, format: OutputFormat) -> Self {
        Self { index, pages, format }
    }

    pub fn search(&self, query: &Query) -> SearchResponse {
        let results: Vec<SearchHit> = rank(&query.evaluate(&self.index))
            .into_iter()
            .map(|r| SearchHit { doc_id: r.doc_id, score: r.score, url: self.url_of(r.doc_id) })
            .collect();
        SearchResponse { query: query.to_string(), total_hits: results.len(), results }
    }

    fn url_of(&self, doc_id: DocId) -> String {
        match self.pages.load_url(doc_id) {
            Ok(Some(url)) => url,
            Ok(None) => {
                tracing::warn!(doc_id, "no page file for matching document");
                String::new()
            }
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "cannot read page url");
                String::new()
            }
        }
    }

    /// Answer one query line. Bad queries are reported on `err` and
    /// produce no results; blank lines produce nothing.
    pub fn process_line<W: Write, E: Write>(&self, line: &str, out: &mut W, err: &mut E) -> io::Result<()> {
        let query = match Query::parse(line) {
            Ok(q) => q,
            Err(e) => {
                writeln!(err, "Error: {e}")?;
                return Ok(());
            }
        };
        if query.is_empty() {
            return Ok(());
        }

        let response = self.search(&query);
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &response)?;
                writeln!(out)?;
            }
            OutputFormat::Text => write_text(out, &response)?,
        }
        Ok(())
    }

    /// Answer every line of `input` until it runs out. With `prompt` set,
    /// `Query? ` is written before each line is read.
    pub fn run<R: BufRead, W: Write, E: Write>(&self, input: R, out: &mut W, err: &mut E, prompt: bool) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "Query? ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            self.process_line(&line?, out, err)?;
            out.flush()?;
        }
        if prompt {
            writeln!(out)?;
        }
        Ok(())
    }
}

fn write_text<W: Write>(out: &mut W, response: &SearchResponse) -> io::Result<()> {
    writeln!(out, "Query: {}", response.query)?;
    if response.results.is_empty() {
        writeln!(out, "No documents match.")?;
    } else {
        writeln!(out, "Matches {} documents (ranked):", response.total_hits)?;
        for hit in &response.results {
            writeln!(out, "score {:3} doc {:3}: {}", hit.score, hit.doc_id, hit.url)?;
        }
    }
    writeln!(out, "{SEPARATOR}")
}
