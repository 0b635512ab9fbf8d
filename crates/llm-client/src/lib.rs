//! Client for the remote recommendation (language-model) service.
//!
//! This crate asks an external inference endpoint for books similar to a
//! given title. It handles:
//! - Building the JSON request body with a real encoder
//! - Sending it over HTTP with a bounded timeout
//! - Decoding the list of recommended titles from the response
//! - Sorting failures into "couldn't reach it" and "it answered nonsense"
//!
//! Wire format:
//!
//! ```text
//! POST <endpoint>
//! Content-Type: application/json
//!
//! {"book": "Harry Potter"}
//!
//! 200 OK
//! {"recommendations": ["Percy Jackson", "The Hobbit"]}
//! ```

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

/// Default bound on a single request, connect through body
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an error body kept in error messages
const ERROR_BODY_PREVIEW: usize = 200;

/// Errors that can occur when asking the recommendation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmClientError {
    /// Transport failure: refused, DNS, timeout, interrupted body, or no
    /// endpoint configured at all
    #[error("Recommendation endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    /// The service answered, but not with `{"recommendations": [...]}`
    #[error("Invalid response from recommendation endpoint: {0}")]
    InvalidResponse(String),
}

/// Request body sent to the endpoint
#[derive(Debug, Serialize)]
struct RecommendRequest<'a> {
    book: &'a str,
}

/// Response body expected back
#[derive(Debug, Deserialize)]
struct RecommendResponse {
    recommendations: Vec<String>,
}

/// Client for the remote recommendation service.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct LlmRecommenderClient {
    client: reqwest::Client,
    endpoint: Option<String>,
    timeout: Duration,
}

impl LlmRecommenderClient {
    /// Create a client for `endpoint`.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL to POST to. `None` or a blank string is kept
    ///   as "not configured", and every call then fails with
    ///   `EndpointUnreachable`.
    /// * `timeout` - Upper bound for each request
    pub fn new(endpoint: Option<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Building HTTP client for recommendation endpoint")?;

        match &endpoint {
            Some(url) => info!("Remote recommendations via {} (timeout {:?})", url, timeout),
            None => info!("No remote recommendation endpoint configured"),
        }

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// The configured endpoint, if any
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Ask the service for books similar to `title`.
    ///
    /// `title` is sent as given. Rejecting an empty title is the caller's
    /// job; the `pipeline` crate's `Recommender` impl does it before any
    /// request is made.
    ///
    /// # Returns
    /// Recommended titles in the order the service listed them. These may
    /// name books that aren't in the catalog.
    ///
    /// # Errors
    /// - `EndpointUnreachable` if no endpoint is configured or the request
    ///   never got a complete answer
    /// - `InvalidResponse` for a non-2xx status, a body that isn't JSON, or
    ///   a body without a `recommendations` list
    pub async fn recommend_by_remote(
        &self,
        title: &str,
    ) -> std::result::Result<Vec<String>, LlmClientError> {
        let url = self.endpoint.as_deref().ok_or_else(|| {
            LlmClientError::EndpointUnreachable("no endpoint configured".into())
        })?;

        debug!("Requesting remote recommendations for {:?}", title);

        // `.json` serializes through serde_json and sets the content type
        let response = self
            .client
            .post(url)
            .json(&RecommendRequest { book: title })
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                self.transport_error(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Reading response body from {} failed: {}", url, e);
            self.transport_error(e)
        })?;

        if !status.is_success() {
            return Err(LlmClientError::InvalidResponse(format!(
                "HTTP {}: {}",
                status,
                preview(&body)
            )));
        }

        let recommendations = parse_recommendations(&body)?;
        debug!(
            "Remote endpoint returned {} recommendations",
            recommendations.len()
        );
        Ok(recommendations)
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmClientError {
        if err.is_timeout() {
            LlmClientError::EndpointUnreachable(format!(
                "request timed out after {:?}",
                self.timeout
            ))
        } else {
            LlmClientError::EndpointUnreachable(err.to_string())
        }
    }
}

/// Decode `{"recommendations": [...]}`.
fn parse_recommendations(body: &str) -> std::result::Result<Vec<String>, LlmClientError> {
    serde_json::from_str::<RecommendResponse>(body)
        .map(|r| r.recommendations)
        .map_err(|e| LlmClientError::InvalidResponse(format!("{} in body {}", e, preview(body))))
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
