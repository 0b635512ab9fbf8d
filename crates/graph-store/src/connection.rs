//! Scoped access to the graph store.
//!
//! Nothing in this crate keeps a connection alive between operations. Each
//! operation asks a `GraphConnector` for a fresh `GraphSession`, uses it, and
//! lets it drop. Dropping the session closes the connection, so early returns
//! and `?` release it the same way a successful return does.
//!
//! Rust concepts demonstrated:
//! - Traits with associated types (`GraphConnector::Session`)
//! - `async_trait` for async methods behind trait objects and generics
//! - RAII: resources released in `Drop`, not by explicit close calls

use async_trait::async_trait;
use catalog::Book;
use neo4rs::{ConfigBuilder, Graph, query};
use tracing::debug;

use crate::error::{Result, StoreError};

/// Upsert keyed on the (title, author) natural key
pub const UPSERT_BOOK: &str = "MERGE (b:Book {title: $title, author: $author})";

/// Titles one `SIMILAR_TO` hop away from a book, in either direction
pub const SIMILAR_TITLES: &str =
    "MATCH (b:Book {title: $title})-[:SIMILAR_TO]-(rec:Book) RETURN rec.title";

/// Column name the traversal query returns titles under
const SIMILAR_TITLE_COLUMN: &str = "rec.title";

/// One unit of work against the graph store.
///
/// A session is only ever used by one operation; the connection behind it
/// is closed when it drops.
#[async_trait]
pub trait GraphSession: Send {
    /// Create the book's node unless one with the same (title, author)
    /// already exists.
    async fn merge_book(&mut self, book: &Book) -> Result<()>;

    /// Titles of all books joined to `title` by a `SIMILAR_TO` edge.
    async fn similar_titles(&mut self, title: &str) -> Result<Vec<String>>;
}

/// Opens sessions against a graph store.
///
/// This is the only way code in this workspace reaches the store; callers
/// hold a connector, never a connection.
#[async_trait]
pub trait GraphConnector: Send + Sync {
    type Session: GraphSession;

    async fn open(&self) -> Result<Self::Session>;
}

// =============================================================================
// Neo4j
// =============================================================================

/// Connection settings for a Neo4j server reached over Bolt.
#[derive(Clone)]
pub struct Neo4jConnector {
    uri: String,
    user: String,
    password: String,
}

impl Neo4jConnector {
    /// # Arguments
    /// * `uri` - Bolt address, e.g. "127.0.0.1:7687" or "neo4j://db:7687"
    /// * `user` / `password` - credentials, passed through untouched
    pub fn new(
        uri: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

// Keep the password out of logs and panics
impl std::fmt::Debug for Neo4jConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jConnector")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl GraphConnector for Neo4jConnector {
    type Session = Neo4jSession;

    async fn open(&self) -> Result<Neo4jSession> {
        debug!("Opening graph session to {}", self.uri);

        // A pool of one: the session is a single connection that lives
        // exactly as long as the operation using it
        let config = ConfigBuilder::default()
            .uri(self.uri.as_str())
            .user(self.user.as_str())
            .password(self.password.as_str())
            .max_connections(1)
            .build()
            .map_err(|e| StoreError::unavailable(format!("invalid Neo4j config: {}", e)))?;

        let graph = Graph::connect(config).await.map_err(|e| {
            StoreError::unavailable(format!("connecting to {}: {}", self.uri, e))
        })?;

        Ok(Neo4jSession { graph })
    }
}

/// A live Neo4j session.
///
/// Every statement runs in its own explicit transaction. neo4rs retries
/// `Graph::run` and `Graph::execute` with backoff for up to a minute;
/// transactions are never retried, so a lost server fails the statement
/// straight away.
pub struct Neo4jSession {
    graph: Graph,
}

#[async_trait]
impl GraphSession for Neo4jSession {
    async fn merge_book(&mut self, book: &Book) -> Result<()> {
        let statement = query(UPSERT_BOOK)
            .param("title", book.title.as_str())
            .param("author", book.author.as_str());

        let mut txn = self.graph.start_txn().await?;
        txn.run(statement).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn similar_titles(&mut self, title: &str) -> Result<Vec<String>> {
        let statement = query(SIMILAR_TITLES).param("title", title);

        let mut txn = self.graph.start_txn().await?;
        let mut rows = txn.execute(statement).await?;

        let mut titles = Vec::new();
        while let Some(row) = rows.next(txn.handle()).await? {
            let title: String = row.get(SIMILAR_TITLE_COLUMN).map_err(|e| {
                StoreError::unavailable(format!("unexpected row from traversal query: {}", e))
            })?;
            titles.push(title);
        }
        txn.commit().await?;
        Ok(titles)
    }
}
