use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::counts::AloneCounts;
use crate::eutils::client::DEFAULT_EUTILS_URL;

/// NCBI allows 3 requests/second without an API key.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 340;
/// Ids requested per term when harvesting.
pub const DEFAULT_RETMAX: usize = 500;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy. Every value has a default
/// so the tool runs with no configuration at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// E-utilities base URL (defaults to the public NCBI endpoint)
    pub eutils_url: String,
    /// Optional NCBI API key, forwarded on every request
    pub api_key: Option<String>,
    /// Root directory for saved counts and words data
    pub data_dir: PathBuf,
    /// Minimum milliseconds between consecutive requests
    pub request_delay_ms: u64,
    /// Default harvest page size
    pub retmax: usize,
    /// Source of the per-term alone-counts in co-occurrence scrapes
    pub alone_counts: AloneCounts,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_delay_ms = match lookup("ERPSCANR_REQUEST_DELAY_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("ERPSCANR_REQUEST_DELAY_MS is not a number: {raw}"))?,
            None => DEFAULT_REQUEST_DELAY_MS,
        };

        let retmax = match lookup("ERPSCANR_RETMAX") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("ERPSCANR_RETMAX is not a number: {raw}"))?,
            None => DEFAULT_RETMAX,
        };
        if retmax == 0 {
            anyhow::bail!("ERPSCANR_RETMAX must be at least 1");
        }

        let alone_counts = match lookup("ERPSCANR_DEDICATED_COUNTS").as_deref().map(str::trim) {
            None | Some("") | Some("0") | Some("false") => AloneCounts::LastPair,
            Some("1") | Some("true") => AloneCounts::Dedicated,
            Some(other) => anyhow::bail!(
                "ERPSCANR_DEDICATED_COUNTS must be true or false, got {other:?}"
            ),
        };

        Ok(Self {
            eutils_url: lookup("ERPSCANR_EUTILS_URL")
                .unwrap_or_else(|| DEFAULT_EUTILS_URL.to_string()),
            api_key: lookup("NCBI_API_KEY").filter(|k| !k.is_empty()),
            data_dir: lookup("ERPSCANR_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data")),
            request_delay_ms,
            retmax,
            alone_counts,
        })
    }
}
