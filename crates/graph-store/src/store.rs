//! Writing the catalog into the graph store.

use std::sync::Arc;
use std::time::Instant;

use catalog::Book;
use tracing::{debug, error, info};

use crate::connection::{GraphConnector, GraphSession};
use crate::error::{Result, StoreError};

/// Upserts books as `Book` nodes.
///
/// Each call opens its own session and closes it before returning.
pub struct CatalogStore<C> {
    connector: Arc<C>,
}

impl<C: GraphConnector> CatalogStore<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Upsert every book, in order, keyed on (title, author).
    ///
    /// # Returns
    /// Number of books written. Books already present count as written;
    /// the store leaves their nodes unchanged.
    ///
    /// # Errors
    /// `StoreUnavailable` if the session can't be opened or any write fails.
    /// The error's `written` field says how many books made it in first;
    /// those stay committed.
    pub async fn upsert(&self, books: &[Book]) -> Result<usize> {
        let start = Instant::now();
        let mut session = self.connector.open().await.map_err(|e| {
            error!("Could not open graph session for upsert: {}", e);
            e
        })?;

        let mut written = 0;
        for book in books {
            if let Err(e) = session.merge_book(book).await {
                error!(
                    "Upsert failed after {} of {} books: {}",
                    written,
                    books.len(),
                    e
                );
                return Err(StoreError::StoreUnavailable {
                    written,
                    reason: failure_reason(e),
                });
            }
            written += 1;
            debug!("Upserted {}", book);
        }

        info!(
            "Upserted {} books in {:.2?}",
            written,
            start.elapsed()
        );
        Ok(written)
    }
}

fn failure_reason(err: StoreError) -> String {
    match err {
        StoreError::StoreUnavailable { reason, .. } => reason,
    }
}
