// Literature search trait, the seam between the scrape logic and the network.
//
// The co-occurrence engine and the record harvester only need three calls.
// EutilsClient implements them over HTTP; tests implement them over canned
// responses.

use async_trait::async_trait;

use super::xml::XmlElement;
use crate::error::Result;

#[async_trait]
pub trait LiteratureSearch: Send + Sync {
    /// Every document count reported for `query`, in response order.
    async fn search_counts(&self, query: &str) -> Result<Vec<u64>>;

    /// Identifiers of documents matching `query`, at most `retmax` of them.
    async fn search_ids(&self, query: &str, retmax: usize) -> Result<Vec<u64>>;

    /// Full records for `ids`, fetched in one batch, in the order returned.
    async fn fetch_records(&self, ids: &[u64]) -> Result<Vec<XmlElement>>;
}

/// Quote a term for an exact-phrase search.
pub fn phrase(term: &str) -> String {
    format!("\"{term}\"")
}

/// Exact-phrase conjunction of two terms: `"a"AND"b"`.
pub fn and_query(a: &str, b: &str) -> String {
    format!("{}AND{}", phrase(a), phrase(b))
}

/// Comma-joined id list for the fetch endpoint.
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
