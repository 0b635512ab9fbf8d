//! Core domain types for the book catalog.
//!
//! Rust concepts demonstrated here:
//! - Structs with public fields
//! - Derive macros for common traits
//! - Deriving `Hash`/`Eq` so a value can serve as a natural key

use std::fmt;

// =============================================================================
// Book
// =============================================================================

/// A single book from the catalog.
///
/// The pair (`title`, `author`) is the book's identity: two rows with the same
/// pair describe the same book, and the graph store never holds two nodes for
/// one pair. The reader keeps duplicates as-is and leaves collapsing them to
/// the store's upsert.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Book {
    /// Never empty
    pub title: String,
    /// May be empty when the source doesn't know the author
    pub author: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
        }
    }

    /// The natural key used by the store for upserts
    pub fn key(&self) -> (&str, &str) {
        (&self.title, &self.author)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.author.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} by {}", self.title, self.author)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_title_and_author() {
        let book = Book::new("Dune", "Frank Herbert");
        assert_eq!(book.key(), ("Dune", "Frank Herbert"));
    }

    #[test]
    fn test_display_without_author() {
        assert_eq!(Book::new("Beowulf", "").to_string(), "Beowulf");
        assert_eq!(
            Book::new("Emma", "Jane Austen").to_string(),
            "Emma by Jane Austen"
        );
    }
}
