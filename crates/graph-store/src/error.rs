//! Error types for the graph-store crate.

use thiserror::Error;

/// Errors that can occur while talking to the graph store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The connection could not be opened, or was lost mid-operation.
    ///
    /// `written` counts the books committed by the failing call before the
    /// connection went away. Each write commits in its own transaction, so
    /// those books stay in the store; upserting the whole catalog again is
    /// safe.
    #[error("Graph store unavailable ({written} books written before failure): {reason}")]
    StoreUnavailable { written: usize, reason: String },
}

impl StoreError {
    /// Failure before anything was written (connects and reads)
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StoreError::StoreUnavailable {
            written: 0,
            reason: reason.into(),
        }
    }

    /// Number of books committed before the failure
    pub fn written(&self) -> usize {
        match self {
            StoreError::StoreUnavailable { written, .. } => *written,
        }
    }
}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        StoreError::unavailable(err.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
