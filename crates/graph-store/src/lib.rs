//! # Graph Store Crate
//!
//! Persists the book catalog as `Book` nodes in Neo4j and answers
//! "what is similar to this book" by walking `SIMILAR_TO` edges.
//!
//! ## Components
//!
//! - **connection**: `GraphConnector` / `GraphSession` traits and the Neo4j
//!   implementation. Sessions are scoped to a single operation.
//! - **store**: `CatalogStore`, idempotent upsert of books
//! - **recommender**: `GraphRecommender`, one-hop traversal
//! - **memory**: `MemoryGraph`, an in-process store for tests (`test-util`
//!   feature)
//!
//! ## Example Usage
//!
//! ```ignore
//! use graph_store::{CatalogStore, GraphRecommender, Neo4jConnector};
//! use std::sync::Arc;
//!
//! let connector = Arc::new(Neo4jConnector::new("127.0.0.1:7687", "neo4j", password));
//! let written = CatalogStore::new(connector.clone()).upsert(&books).await?;
//! let similar = GraphRecommender::new(connector).recommend_by_graph("Dune").await?;
//! ```

pub mod connection;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod recommender;
pub mod store;

pub use connection::{GraphConnector, GraphSession, Neo4jConnector, Neo4jSession};
pub use error::{Result, StoreError};
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryGraph;
pub use recommender::GraphRecommender;
pub use store::CatalogStore;
