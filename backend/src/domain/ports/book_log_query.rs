//! Driving port for book log reads.

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookListQuery, Error};

/// Driving port for book log read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookLogQuery: Send + Sync {
    /// List books matching the filter in the requested order.
    async fn list_books(&self, query: BookListQuery) -> Result<Vec<Book>, Error>;

    /// Fetch one book or fail with not-found.
    async fn get_book(&self, id: BookId) -> Result<Book, Error>;
}
