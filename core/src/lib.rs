//! Building blocks of the tiny search engine: the crawl frontier, the
//! inverted index and its file format, and boolean query evaluation.

pub mod counter;
pub mod error;
pub mod frontier;
pub mod index;
pub mod pagedir;
pub mod query;
pub mod rank;
pub mod webpage;
pub mod word;

pub use counter::Counter;
pub use error::{CrawlError, IndexError, QueryError, StoreError};
pub use frontier::{CrawlFrontier, CrawlSummary, Crawler, PageFetcher, PageStore};
pub use index::{DocId, InvertedIndex, MIN_WORD_LEN};
pub use pagedir::PageDir;
pub use query::{Query, Token};
pub use rank::{rank, QueryResult};
pub use webpage::{UrlScope, Webpage};
