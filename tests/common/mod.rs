// Canned LiteratureSearch for integration tests. No network access.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use erpscanr::error::{Result, ScrapeError};
use erpscanr::eutils::xml::parse_articles;
use erpscanr::eutils::{LiteratureSearch, XmlElement};

#[derive(Default)]
pub struct MockSearch {
    counts: HashMap<String, Vec<u64>>,
    ids: HashMap<String, Vec<u64>>,
    records_xml: Option<String>,
    /// Every query or id batch seen, in call order.
    pub calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(mut self, query: &str, counts: &[u64]) -> Self {
        self.counts.insert(query.to_string(), counts.to_vec());
        self
    }

    /// Register a consistent pair response: joint, target alone, association alone.
    pub fn with_pair(self, target: &str, association: &str, counts: [u64; 3]) -> Self {
        let query = format!("\"{target}\"AND\"{association}\"");
        self.with_counts(&query, &counts)
    }

    pub fn with_ids(mut self, term: &str, ids: &[u64]) -> Self {
        self.ids.insert(format!("\"{term}\""), ids.to_vec());
        self
    }

    /// efetch body returned for every batch. Without one, fetches fail.
    pub fn with_records(mut self, xml: &str) -> Self {
        self.records_xml = Some(xml.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record_call(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LiteratureSearch for MockSearch {
    async fn search_counts(&self, query: &str) -> Result<Vec<u64>> {
        self.record_call(query.to_string());
        self.counts
            .get(query)
            .cloned()
            .ok_or_else(|| ScrapeError::Transport {
                endpoint: "esearch.fcgi".to_string(),
                message: format!("no canned response for {query}"),
            })
    }

    async fn search_ids(&self, query: &str, _retmax: usize) -> Result<Vec<u64>> {
        self.record_call(query.to_string());
        self.ids
            .get(query)
            .cloned()
            .ok_or_else(|| ScrapeError::Transport {
                endpoint: "esearch.fcgi".to_string(),
                message: format!("no canned response for {query}"),
            })
    }

    async fn fetch_records(&self, ids: &[u64]) -> Result<Vec<XmlElement>> {
        let joined = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.record_call(format!("fetch:{joined}"));
        match &self.records_xml {
            Some(xml) => parse_articles(&joined, xml),
            None => Err(ScrapeError::Status {
                endpoint: "efetch.fcgi".to_string(),
                status: 503,
                body: "Service Unavailable".to_string(),
            }),
        }
    }
}

/// Wrap article bodies in a PubmedArticleSet document.
#[allow(dead_code)]
pub fn article_set(articles: &[&str]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<PubmedArticleSet>\n");
    for article in articles {
        xml.push_str("<PubmedArticle><MedlineCitation>");
        xml.push_str(article);
        xml.push_str("</MedlineCitation></PubmedArticle>\n");
    }
    xml.push_str("</PubmedArticleSet>");
    xml
}

#[allow(dead_code)]
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
