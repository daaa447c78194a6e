use crate::{Counter, DocId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryResult {
    pub doc_id: DocId,
    pub score: u32,
}

/// Highest score first. Equal scores keep the counter's iteration order,
/// which is ascending docID.
pub fn rank(scores: &Counter) -> Vec<QueryResult> {
    let mut results: Vec<QueryResult> = scores.iter().map(|(doc_id, score)| QueryResult { doc_id, score }).collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
