//! Recommendation strategies behind one interface.
//!
//! This crate provides:
//! - The `Recommender` trait and the `RecommendError` every strategy returns
//! - `Recommender` implementations for graph traversal and the remote
//!   language-model endpoint
//! - `RecommenderSet` for running several strategies for one title
//!
//! ## Architecture
//! Strategies are independent. Each one either returns a list of titles or
//! a typed error, and the set records both kinds of outcome side by side.
//! Adding a strategy means implementing the trait and calling
//! `add_recommender`; nothing downstream changes.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RecommenderSet;
//! use graph_store::GraphRecommender;
//! use llm_client::LlmRecommenderClient;
//!
//! let set = RecommenderSet::new()
//!     .add_recommender(GraphRecommender::new(connector.clone()))
//!     .add_recommender(LlmRecommenderClient::new(endpoint, timeout)?);
//!
//! let outcomes = set.recommend_all("Harry Potter").await;
//! ```

pub mod recommender_set;
pub mod recommenders;
pub mod traits;

// Re-export main types
pub use recommender_set::{RecommenderSet, StrategyOutcome};
pub use recommenders::{GRAPH_STRATEGY, REMOTE_STRATEGY};
pub use traits::{RecommendError, Recommender};
