// HTTP client for the NCBI E-utilities search and fetch endpoints.
//
// esearch answers both kinds of search (counts for co-occurrence queries,
// id lists for harvests); efetch returns the PubMed XML for a batch of ids.
// Every request goes through the rate limiter first and is awaited before
// the next one is issued.

use anyhow::Context;
use async_trait::async_trait;
use tracing::debug;

use super::rate_limiter::RateLimiter;
use super::traits::{join_ids, LiteratureSearch};
use super::xml::{self, XmlElement};
use crate::error::{Result, ScrapeError};

/// Default E-utilities base URL.
pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const ESEARCH: &str = "esearch.fcgi";
const EFETCH: &str = "efetch.fcgi";

/// E-utilities client bound to the PubMed database.
pub struct EutilsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    limiter: RateLimiter,
}

impl EutilsClient {
    /// Create a client pointing at `base_url`. Pass a different URL for
    /// testing against a mirror.
    pub fn new(base_url: &str, api_key: Option<String>, limiter: RateLimiter) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("erpscanr/0.1 (literature co-occurrence)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            limiter,
        })
    }

    async fn get_text(&self, endpoint: &str, mut params: Vec<(&'static str, String)>) -> Result<String> {
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        let url = format!("{}/{}", self.base_url, endpoint);

        self.limiter.acquire().await;
        debug!(endpoint = endpoint, "E-utilities GET request");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(endpoint, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(endpoint, e))
    }

    fn search_params(query: &str) -> Vec<(&'static str, String)> {
        vec![
            ("db", "pubmed".to_string()),
            ("field", "word".to_string()),
            ("term", query.to_string()),
        ]
    }
}

#[async_trait]
impl LiteratureSearch for EutilsClient {
    async fn search_counts(&self, query: &str) -> Result<Vec<u64>> {
        let body = self.get_text(ESEARCH, Self::search_params(query)).await?;
        xml::parse_counts(query, &body)
    }

    async fn search_ids(&self, query: &str, retmax: usize) -> Result<Vec<u64>> {
        let mut params = Self::search_params(query);
        params.push(("retmax", retmax.to_string()));
        let body = self.get_text(ESEARCH, params).await?;
        xml::parse_ids(query, &body)
    }

    async fn fetch_records(&self, ids: &[u64]) -> Result<Vec<XmlElement>> {
        let id_list = join_ids(ids);
        let params = vec![
            ("db", "pubmed".to_string()),
            ("retmode", "xml".to_string()),
            ("id", id_list.clone()),
        ];
        let body = self.get_text(EFETCH, params).await?;
        xml::parse_articles(&id_list, &body)
    }
}
