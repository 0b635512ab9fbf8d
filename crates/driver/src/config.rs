//! Run configuration.
//!
//! Everything that differs between deployments (file location, database
//! address and credentials, endpoint URL) comes in through here. Nothing
//! in the workspace hardcodes them.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration problems caught before the pipeline starts
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Book title to recommend for must not be empty")]
    EmptyTitle,

    #[error("Neo4j URI must not be empty")]
    EmptyGraphUri,

    #[error("Remote recommendation timeout must be greater than zero")]
    ZeroTimeout,
}

/// Where the graph store lives and how to log in
#[derive(Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote recommendation endpoint settings
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// `None` (or blank) leaves the remote strategy unconfigured; it then
    /// reports `EndpointUnreachable` on every run instead of being skipped
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

/// Full configuration for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub catalog_path: PathBuf,
    pub delimiter: u8,
    pub title: String,
    pub graph: GraphConfig,
    pub remote: RemoteConfig,
}

impl PipelineConfig {
    /// Reject settings that would make the run fail in a confusing way later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if self.graph.uri.trim().is_empty() {
            return Err(ConfigError::EmptyGraphUri);
        }
        if self.remote.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
