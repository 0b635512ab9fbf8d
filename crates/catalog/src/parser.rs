//! Reader for delimited book catalogs.
//!
//! Expected layout (any delimiter, comma by default):
//!
//! ```text
//! id,title,author,...
//! 1,Harry Potter,J.K. Rowling,...
//! ```
//!
//! The first row is always treated as a header and skipped. Column 1 is the
//! title, column 2 the author; everything else is ignored.
//!
//! Malformed rows abort the whole read. A partially-read catalog is never
//! returned, so the store either sees every row of the file or none of them.

use crate::error::{CatalogError, Result};
use crate::types::Book;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const TITLE_FIELD: usize = 1;
const AUTHOR_FIELD: usize = 2;
const MIN_FIELDS: usize = 3;

/// Label used in errors when reading from something other than a file
const READER_LABEL: &str = "<reader>";

/// Reads `Book` records from delimited text.
///
/// ## Usage
/// ```ignore
/// let books = CatalogReader::new().read_path(Path::new("books.csv"))?;
/// let books = CatalogReader::new().with_delimiter(b';').read_path(path)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CatalogReader {
    delimiter: u8,
}

impl CatalogReader {
    /// Create a reader for comma-delimited input.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter (builder pattern).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read all books from the file at `path`.
    ///
    /// Fails with `SourceUnavailable` if the file can't be opened.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Book>> {
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| CatalogError::SourceUnavailable {
            path: label.clone(),
            source,
        })?;

        let books = self.read_records(&label, file)?;
        info!("Read {} books from {}", books.len(), label);
        Ok(books)
    }

    /// Read all books from an arbitrary byte source.
    pub fn read_from<R: Read>(&self, source: R) -> Result<Vec<Book>> {
        self.read_records(READER_LABEL, source)
    }

    fn read_records<R: Read>(&self, label: &str, source: R) -> Result<Vec<Book>> {
        // `flexible` so that short rows reach our own field-count check and
        // get reported as malformed records with a line number
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let mut books = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            // Header is line 1, so the n-th data row starts at line n + 2
            // unless a quoted field spans several lines
            let fallback_line = idx as u64 + 2;
            let record = record.map_err(|e| classify_csv_error(e, label, fallback_line))?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line);

            books.push(parse_book(&record, line)?);
        }

        debug!("Parsed {} data rows from {}", books.len(), label);
        Ok(books)
    }
}

impl Default for CatalogReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn one CSV record into a `Book`
fn parse_book(record: &csv::StringRecord, line: u64) -> Result<Book> {
    if record.len() < MIN_FIELDS {
        return Err(CatalogError::MalformedRecord {
            line,
            reason: format!(
                "expected at least {} fields but found {}",
                MIN_FIELDS,
                record.len()
            ),
        });
    }

    // Both lookups are in range after the length check above
    let title = record.get(TITLE_FIELD).unwrap_or_default();
    let author = record.get(AUTHOR_FIELD).unwrap_or_default();

    if title.trim().is_empty() {
        return Err(CatalogError::MalformedRecord {
            line,
            reason: "empty title".to_string(),
        });
    }

    Ok(Book::new(title, author))
}

/// I/O failures mean the source went away; anything else is a bad row.
fn classify_csv_error(err: csv::Error, label: &str, fallback_line: u64) -> CatalogError {
    let line = err.position().map(|p| p.line()).unwrap_or(fallback_line);
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => CatalogError::SourceUnavailable {
            path: label.to_string(),
            source,
        },
        _ => CatalogError::MalformedRecord { line, reason },
    }
}
