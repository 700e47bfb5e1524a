//! Web search via SerpAPI
//!
//! Turns a free-text query into a single flat answer string by joining
//! the snippets of every organic result. All failure modes collapse to
//! fixed sentinel strings at the point of detection, so downstream
//! consumers (summarizer, speech synthesis) only ever see valid text.

pub mod retry;

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{Error, Result};
use retry::{delay_for_attempt, is_recoverable_status, is_recoverable_transport, RetryPolicy};

/// Default SerpAPI endpoint
pub const DEFAULT_ENDPOINT: &str = "https://serpapi.com/search.json";

/// Per-attempt request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sentinel returned when the search succeeds but matches nothing
pub const NO_RESULTS: &str = "no results found";

/// Sentinel returned on a non-recoverable search failure
pub const SEARCH_FAILED: &str = "Something went wrong while searching. Please try again.";

/// Sentinel returned after exhausting all retry attempts
pub const SEARCH_UNAVAILABLE: &str =
    "Search is unavailable right now. Please try again in a moment.";

/// A provider that answers free-text queries with a flat text answer.
///
/// Implementations must never fail: every error is converted to a
/// sentinel string so the rest of the pipeline stays infallible.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Answer a query with a single aggregated text string
    async fn answer(&self, query: &str) -> String;
}

/// SerpAPI search response (the fields we consume)
#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    organic_results: Option<Vec<OrganicResult>>,
}

/// A single organic result entry
#[derive(Debug, Deserialize)]
struct OrganicResult {
    snippet: Option<String>,
}

/// Web search client backed by SerpAPI
pub struct SearchClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    policy: RetryPolicy,
}

impl SearchClient {
    /// Create a new search client against the default SerpAPI endpoint
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    /// Create a new search client against a custom endpoint
    ///
    /// The endpoint override exists so tests can point the client at a
    /// mock server; production use keeps [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn with_endpoint(api_key: String, endpoint: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("SerpAPI key required for search".to_string()));
        }

        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(Error::Http)?,
            api_key,
            endpoint,
            policy: RetryPolicy::default(),
        })
    }

    /// Override the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Issue one GET to the search endpoint and parse the response
    async fn fetch(&self, query: &str) -> std::result::Result<SerpApiResponse, AttemptError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str()), ("q", query)])
            .send()
            .await
            .map_err(AttemptError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "search API error");
            return Err(AttemptError::Status(status.as_u16()));
        }

        response.json::<SerpApiResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse search response");
            AttemptError::Transport(e)
        })
    }

    /// Perform a search with bounded retry, returning the raw result
    ///
    /// Recoverable failures (timeouts, connection errors, 429/5xx) are
    /// retried with exponential backoff up to the policy's attempt
    /// budget. Non-recoverable failures return immediately.
    async fn search(&self, query: &str) -> std::result::Result<SerpApiResponse, AttemptError> {
        let mut attempt = 0;
        loop {
            match self.fetch(query).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if !e.is_recoverable() || attempt + 1 >= self.policy.max_attempts {
                        return Err(e);
                    }

                    let delay = delay_for_attempt(&self.policy, attempt);
                    tracing::debug!(
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "search attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

/// A single failed search attempt
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search API error {0}")]
    Status(u16),
}

impl AttemptError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Transport(e) => is_recoverable_transport(e),
            Self::Status(code) => is_recoverable_status(*code),
        }
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    /// Answer a query with the aggregated snippet text
    ///
    /// Never fails: recoverable failures that exhaust the retry budget
    /// become [`SEARCH_UNAVAILABLE`], non-recoverable failures become
    /// [`SEARCH_FAILED`], and an empty result set becomes
    /// [`NO_RESULTS`].
    async fn answer(&self, query: &str) -> String {
        match self.search(query).await {
            Ok(response) => aggregate_snippets(response.organic_results.as_deref()),
            Err(e) => {
                tracing::error!(error = %e, query, "search failed");
                if e.is_recoverable() {
                    SEARCH_UNAVAILABLE.to_string()
                } else {
                    SEARCH_FAILED.to_string()
                }
            }
        }
    }
}

/// Join the snippets of all organic results into one flat string.
///
/// Missing snippets contribute an empty string. An absent or empty
/// result list yields the [`NO_RESULTS`] sentinel, which is a
/// successful outcome, not an error.
fn aggregate_snippets(results: Option<&[OrganicResult]>) -> String {
    let Some(results) = results.filter(|r| !r.is_empty()) else {
        return NO_RESULTS.to_string();
    };

    let joined = results
        .iter()
        .map(|r| r.snippet.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ");

    joined.trim().to_string()
}
