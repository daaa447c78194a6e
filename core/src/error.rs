//! Error types shared by the crawler, indexer and querier.
//!
//! Every fallible operation in this crate returns one of the enums below so
//! the binaries can map an error class onto an exit code without string
//! matching.

use std::collections::TryReserveError;
use std::io;

use thiserror::Error;

use crate::DocId;

/// Failures while building, reading or writing an [`InvertedIndex`](crate::InvertedIndex).
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A docID or count field that is not a non-negative integer, or a
    /// docID without its count.
    #[error("malformed index file at line {line}: bad field {token:?}")]
    Format { line: usize, token: String },

    #[error("cannot allocate index storage: {0}")]
    Capacity(#[from] TryReserveError),
}

/// Failures of the page directory (document store).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid docID {0}, docIDs start at 1")]
    InvalidDocId(DocId),

    #[error("page {url} has no content to save")]
    MissingHtml { url: String },

    #[error("malformed page file for docID {doc_id}: {reason}")]
    Format { doc_id: DocId, reason: String },
}

/// Fatal crawl failures. Per-page fetch failures are not errors; the
/// crawl skips those pages and carries on.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("seed URL {0} is not internal")]
    SeedNotInternal(String),

    #[error("failed to save docID {doc_id}: {source}")]
    Persist {
        doc_id: DocId,
        #[source]
        source: StoreError,
    },
}

/// A query line rejected by validation. Always recoverable: the querier
/// reports it and moves on to the next line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("bad character '{0}' in query.")]
    BadCharacter(char),

    #[error("'{0}' cannot be first")]
    LeadingOperator(String),

    #[error("'{0}' cannot be last")]
    TrailingOperator(String),

    #[error("'{0}' and '{1}' cannot be adjacent")]
    AdjacentOperators(String, String),
}
