//! Core trait for recommendation strategies.
//!
//! This module defines the `Recommender` trait that lets the driver run any
//! number of strategies the same way, and the error type they share.

use async_trait::async_trait;
use graph_store::StoreError;
use llm_client::LlmClientError;
use thiserror::Error;

/// Why a strategy produced no recommendations.
///
/// None of these are fatal to a pipeline run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// Rejected before any I/O
    #[error("Title must not be empty")]
    EmptyTitle,

    /// Graph store was unreachable or the connection dropped
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Remote endpoint unreachable or answered with something unusable
    #[error(transparent)]
    Remote(#[from] LlmClientError),
}

/// Core trait for recommendation strategies.
///
/// Given a title, produce titles of similar books, or fail.
///
/// ## Design Note
/// - `Send + Sync` so strategies can be boxed and shared
/// - Results are bare titles; strategies don't promise the books exist in
///   the catalog
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Returns the name of this strategy (for logging and reports)
    fn name(&self) -> &str;

    /// Recommend books similar to `title`.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Recommended titles, possibly empty
    /// * `Err` - If the strategy couldn't produce an answer
    async fn recommend(&self, title: &str) -> Result<Vec<String>, RecommendError>;
}

/// Shared precondition for every strategy
pub(crate) fn check_title(title: &str) -> Result<(), RecommendError> {
    if title.trim().is_empty() {
        Err(RecommendError::EmptyTitle)
    } else {
        Ok(())
    }
}
