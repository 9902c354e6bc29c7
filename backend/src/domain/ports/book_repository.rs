//! Port for book persistence.
//!
//! Adapters own the single `books` table: schema creation, demonstration
//! seeding and plain CRUD.

use async_trait::async_trait;

use crate::domain::{Book, BookDetails, BookId, BookListQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by book repository adapters.
    pub enum BookRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "book repository query failed: {message}",
        /// The write violated a storage constraint such as the rating range.
        ConstraintViolation { message: String } =>
            "book violates a storage constraint: {message}",
        /// No row matches the identifier.
        NotFound { id: BookId } =>
            "book {id} not found",
    }
}

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The table was empty and the demonstration rows were inserted.
    Applied,
    /// The table already held rows; nothing was written.
    AlreadySeeded,
}

/// Port for reading and writing book entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Create the table when absent. Safe to call on every start.
    async fn ensure_schema(&self) -> Result<(), BookRepositoryError>;

    /// Insert `books` only when the table holds no rows.
    async fn seed_if_empty(
        &self,
        books: &[BookDetails],
    ) -> Result<SeedingResult, BookRepositoryError>;

    /// List books matching the filter in the requested order.
    ///
    /// Without a sort the order is storage-native.
    async fn list(&self, query: &BookListQuery) -> Result<Vec<Book>, BookRepositoryError>;

    /// Find a book by id.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookRepositoryError>;

    /// Persist a new book, assigning its id and creation time.
    async fn insert(&self, details: &BookDetails) -> Result<Book, BookRepositoryError>;

    /// Overwrite every mutable field of an existing book.
    ///
    /// Returns [`BookRepositoryError::NotFound`] when no row matches.
    async fn update(
        &self,
        id: BookId,
        details: &BookDetails,
    ) -> Result<Book, BookRepositoryError>;

    /// Remove a book. Deleting a missing id succeeds.
    async fn delete(&self, id: BookId) -> Result<(), BookRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn not_found_names_the_id() {
        let error = BookRepositoryError::not_found(BookId::new(42));
        assert_eq!(error.to_string(), "book 42 not found");
    }

    #[rstest]
    fn constraint_violation_keeps_database_message() {
        let error = BookRepositoryError::constraint_violation(
            "new row for relation \"books\" violates check constraint \"books_rating_check\"",
        );
        assert!(error.to_string().contains("books_rating_check"));
    }
}
