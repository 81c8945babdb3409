// Error types for the scraping layer.
//
// Scrapes are batch operations with no retry and no checkpointing, so every
// error that escapes a unit of work is terminal. The wrapping variants carry
// the pair or term that was being processed when the failure happened.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The endpoint could not be reached or the body could not be read.
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response did not have the structure the caller relies on.
    #[error("malformed response for query {query}: {reason}")]
    MalformedResponse { query: String, reason: String },

    #[error("co-occurrence scrape failed for {target} / {association}")]
    Pair {
        target: String,
        association: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("count query failed for term {term}")]
    TermCount {
        term: String,
        #[source]
        source: Box<ScrapeError>,
    },

    #[error("harvest failed for term {term}")]
    Harvest {
        term: String,
        #[source]
        source: Box<ScrapeError>,
    },
}

impl ScrapeError {
    pub fn malformed(query: impl Into<String>, reason: impl Into<String>) -> Self {
        ScrapeError::MalformedResponse {
            query: query.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn transport(endpoint: &str, err: reqwest::Error) -> Self {
        ScrapeError::Transport {
            endpoint: endpoint.to_string(),
            message: err.to_string(),
        }
    }
}
