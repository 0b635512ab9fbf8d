//! Error types for the catalog crate.
//!
//! Reading a catalog can fail in exactly two ways: the source itself is
//! unusable, or one of its rows is. Both abort the read.

use thiserror::Error;

/// Errors that can occur while reading a book catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be opened, or reading from it failed part way
    #[error("Catalog source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A data row could not be turned into a `Book`
    ///
    /// `line` is 1-based and counts the header row, so it matches what an
    /// editor shows for the offending row.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
