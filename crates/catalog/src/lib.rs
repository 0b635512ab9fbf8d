//! # Catalog Crate
//!
//! This crate handles reading book catalogs from delimited files.
//!
//! ## Main Components
//!
//! - **types**: The `Book` domain type
//! - **parser**: `CatalogReader`, which turns delimited rows into books
//! - **error**: Error types for catalog reading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogReader;
//! use std::path::Path;
//!
//! let books = CatalogReader::new().read_path(Path::new("books.csv"))?;
//! for book in &books {
//!     println!("{}", book);
//! }
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::CatalogReader;
pub use types::Book;
