//! # Pipeline Driver
//!
//! This module runs the whole pipeline for one title:
//! 1. Read the catalog file
//! 2. Upsert every book into the graph store
//! 3. Ask each recommendation strategy about the title (graph, then remote)
//! 4. Return a report of what happened
//!
//! Steps 1 and 2 are fatal: if either fails the run stops and the error is
//! returned. Step 3 never fails the run; each strategy's error is kept in
//! the report next to the other strategies' results.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::{error, info};

use catalog::{CatalogError, CatalogReader};
use graph_store::{CatalogStore, GraphConnector, GraphRecommender, Neo4jConnector, StoreError};
use llm_client::LlmRecommenderClient;
use pipeline::{RecommenderSet, StrategyOutcome};

use crate::config::PipelineConfig;

/// Failures that stop a run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to store catalog: {0}")]
    Store(#[from] StoreError),
}

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub title: String,
    pub books_read: usize,
    pub books_written: usize,
    /// One entry per strategy, in the order they ran
    pub outcomes: Vec<StrategyOutcome>,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Look up a strategy's outcome by name
    pub fn outcome(&self, strategy: &str) -> Option<&StrategyOutcome> {
        self.outcomes.iter().find(|o| o.strategy == strategy)
    }

    /// Render the report as plain text.
    ///
    /// ```text
    /// Catalog: 3 books read, 3 written
    /// Recommendations for "Harry Potter":
    ///   graph: Percy Jackson, The Hobbit
    ///   remote: unavailable (Recommendation endpoint unreachable: ...)
    /// ```
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Catalog: {} books read, {} written",
            self.books_read, self.books_written
        )?;
        writeln!(out, "Recommendations for {:?}:", self.title)?;
        for outcome in &self.outcomes {
            match &outcome.result {
                Ok(titles) if titles.is_empty() => {
                    writeln!(out, "  {}: (none)", outcome.strategy)?
                }
                Ok(titles) => writeln!(out, "  {}: {}", outcome.strategy, titles.join(", "))?,
                Err(e) => writeln!(out, "  {}: unavailable ({})", outcome.strategy, e)?,
            }
        }
        Ok(())
    }
}

/// Main driver that runs the ingestion and recommendation steps in order
pub struct PipelineDriver<C> {
    reader: CatalogReader,
    store: CatalogStore<C>,
    recommenders: RecommenderSet,
}

impl<C: GraphConnector + 'static> PipelineDriver<C> {
    /// Create a driver with an explicit set of strategies
    pub fn new(reader: CatalogReader, connector: Arc<C>, recommenders: RecommenderSet) -> Self {
        Self {
            reader,
            store: CatalogStore::new(connector),
            recommenders,
        }
    }

    /// Create a driver that runs graph traversal first, then the remote
    /// endpoint.
    pub fn with_default_strategies(
        reader: CatalogReader,
        connector: Arc<C>,
        remote: LlmRecommenderClient,
    ) -> Self {
        let recommenders = RecommenderSet::new()
            .add_recommender(GraphRecommender::new(Arc::clone(&connector)))
            .add_recommender(remote);
        Self::new(reader, connector, recommenders)
    }

    /// Run the pipeline for `title` using the catalog at `source`.
    ///
    /// # Returns
    /// A report with counts and one outcome per strategy, even when every
    /// strategy failed.
    ///
    /// # Errors
    /// `PipelineError` if the catalog can't be read or the store can't be
    /// written. On a store failure, books written before it stay in the
    /// store and the error carries how many there were.
    pub async fn run(&self, source: &Path, title: &str) -> Result<PipelineReport, PipelineError> {
        let start_time = Instant::now();

        // Read catalog
        let books = self.reader.read_path(source).map_err(|e| {
            error!("Reading catalog {} failed: {}", source.display(), e);
            e
        })?;

        // Upsert into the graph store
        let books_written = self.store.upsert(&books).await?;
        info!("Stored {} books", books_written);

        // Recommend
        let outcomes = self.recommenders.recommend_all(title).await;

        let elapsed = start_time.elapsed();
        info!("Pipeline for {:?} finished in {:.2?}", title, elapsed);

        Ok(PipelineReport {
            title: title.to_string(),
            books_read: books.len(),
            books_written,
            outcomes,
            elapsed,
        })
    }
}

impl PipelineDriver<Neo4jConnector> {
    /// Build a Neo4j-backed driver with both default strategies
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let reader = CatalogReader::new().with_delimiter(config.delimiter);
        let connector = Arc::new(Neo4jConnector::new(
            config.graph.uri.clone(),
            config.graph.user.clone(),
            config.graph.password.clone(),
        ));
        let remote = LlmRecommenderClient::new(config.remote.endpoint.clone(), config.remote.timeout)
            .context("Failed to create remote recommendation client")?;

        Ok(Self::with_default_strategies(reader, connector, remote))
    }
}
