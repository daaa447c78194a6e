//! Crawl frontier and the crawl loop that drives it.
//!
//! The loop owns the seen-set and the docID counter. Fetches run
//! concurrently, but their results are handled one at a time by the loop,
//! so URL dedup and docID assignment never race.

use std::collections::{HashSet, VecDeque};
use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::error::{CrawlError, StoreError};
use crate::{DocId, UrlScope, Webpage};

/// Fetches page bodies. Implemented over HTTP by the crawler binary.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<String>>;
}

/// Persists fetched pages under their docID.
pub trait PageStore {
    fn save(&mut self, page: &Webpage, doc_id: DocId) -> Result<(), StoreError>;
}

/// Pages waiting to be fetched plus every URL ever queued.
#[derive(Debug)]
pub struct CrawlFrontier {
    seen: HashSet<String>,
    to_visit: VecDeque<Webpage>,
}

impl CrawlFrontier {
    /// A frontier holding only `seed`, at depth 0.
    pub fn new(seed: &str) -> Self {
        let mut frontier = Self { seen: HashSet::with_capacity(200), to_visit: VecDeque::new() };
        frontier.offer(seed.to_string(), 0);
        frontier
    }

    /// Queue `url` unless it was seen before. Returns whether it was queued.
    pub fn offer(&mut self, url: String, depth: u32) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.to_visit.push_back(Webpage::new(url, depth));
        true
    }

    pub fn next(&mut self) -> Option<Webpage> {
        self.to_visit.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.to_visit.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.to_visit.len()
    }

    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Pages saved; also the last docID assigned.
    pub saved: u32,
    /// Distinct internal URLs discovered, seed included.
    pub seen: usize,
    /// Pages whose fetch failed.
    pub failed: usize,
}

/// Crawl settings. Pages at `max_depth` are saved but not scanned.
#[derive(Debug, Clone)]
pub struct Crawler {
    scope: UrlScope,
    max_depth: u32,
    concurrency: usize,
}

impl Crawler {
    pub fn new(scope: UrlScope, max_depth: u32) -> Self {
        Self { scope, max_depth, concurrency: 1 }
    }

    /// Maximum number of fetches in flight; at least 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn run<F, S>(&self, seed: &str, fetcher: &F, store: &mut S) -> Result<CrawlSummary, CrawlError>
    where
        F: PageFetcher,
        S: PageStore,
    {
        let seed_url = self
            .scope
            .normalize(seed)
            .filter(|u| self.scope.is_internal(u))
            .ok_or_else(|| CrawlError::SeedNotInternal(seed.to_string()))?;

        let mut frontier = CrawlFrontier::new(&seed_url);
        let mut inflight = FuturesUnordered::new();
        let mut next_doc_id: DocId = 1;
        let mut failed = 0usize;

        loop {
            while inflight.len() < self.concurrency {
                let Some(page) = frontier.next() else { break };
                inflight.push(async move {
                    let result = fetcher.fetch(&page.url).await;
                    (page, result)
                });
            }

            let Some((mut page, result)) = inflight.next().await else { break };
            match result {
                Ok(html) => page.html = Some(html),
                Err(e) => {
                    warn!(url = %page.url, error = %e, "fetch failed, skipping");
                    failed += 1;
                    continue;
                }
            }
            debug!(depth = page.depth, url = %page.url, "Fetched");

            let doc_id = next_doc_id;
            store.save(&page, doc_id).map_err(|source| CrawlError::Persist { doc_id, source })?;
            next_doc_id += 1;

            if page.depth < self.max_depth {
                self.scan(&page, &mut frontier);
            }
        }

        let summary = CrawlSummary { saved: next_doc_id - 1, seen: frontier.seen(), failed };
        info!(saved = summary.saved, seen = summary.seen, failed = summary.failed, "crawl complete");
        Ok(summary)
    }

    fn scan(&self, page: &Webpage, frontier: &mut CrawlFrontier) {
        debug!(depth = page.depth, url = %page.url, "Scanning");
        for link in page.links() {
            debug!(depth = page.depth, url = %link, "Found");
            let Some(url) = self.scope.normalize(&link).filter(|u| self.scope.is_internal(u)) else {
                debug!(depth = page.depth, url = %link, "IgnExtrn");
                continue;
            };
            if frontier.offer(url.clone(), page.depth + 1) {
                debug!(depth = page.depth, url = %url, "Added");
            } else {
                debug!(depth = page.depth, url = %url, "IgnDupl");
            }
        }
    }
}
