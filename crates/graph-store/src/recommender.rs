//! Recommendations by graph traversal.

use std::sync::Arc;

use tracing::debug;

use crate::connection::{GraphConnector, GraphSession};
use crate::error::Result;

/// Finds books one `SIMILAR_TO` hop away from a given title.
pub struct GraphRecommender<C> {
    connector: Arc<C>,
}

impl<C: GraphConnector> GraphRecommender<C> {
    pub fn new(connector: Arc<C>) -> Self {
        Self { connector }
    }

    /// Titles related to `title` by a single `SIMILAR_TO` edge.
    ///
    /// Titles are matched exactly, case and whitespace included. A title
    /// that isn't in the store, or has no edges, gives an empty list. Result
    /// order is whatever the store returns. An empty title is queried like
    /// any other; the `pipeline` crate rejects it before calling this.
    pub async fn recommend_by_graph(&self, title: &str) -> Result<Vec<String>> {
        let mut session = self.connector.open().await?;
        let titles = session.similar_titles(title).await?;
        debug!("Graph traversal found {} titles similar to {:?}", titles.len(), title);
        Ok(titles)
    }
}
