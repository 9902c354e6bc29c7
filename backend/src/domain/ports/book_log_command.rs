//! Driving port for book log mutations.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Book, BookId, Error, Isbn, Rating};

/// Validated reader input shared by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntryInput {
    /// Lookup key for metadata; stored with the entry.
    pub isbn: Isbn,
    /// Optional rating.
    pub rating: Option<Rating>,
    /// Optional review text.
    pub review: Option<String>,
    /// Optional date the book was finished.
    pub read_date: Option<NaiveDate>,
}

/// Driving port for book log write operations.
///
/// Create and update share one failure mapping: metadata or storage failures
/// become internal errors carrying the underlying message, and a missing id on
/// update becomes not-found.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookLogCommand: Send + Sync {
    /// Fetch metadata for the ISBN and store a new entry.
    async fn create_book(&self, input: BookEntryInput) -> Result<Book, Error>;

    /// Re-fetch metadata for the submitted ISBN and overwrite the entry.
    async fn update_book(&self, id: BookId, input: BookEntryInput) -> Result<Book, Error>;

    /// Delete the entry; a missing id is not an error.
    async fn delete_book(&self, id: BookId) -> Result<(), Error>;
}
