//! Book log domain service.
//!
//! Implements the driving ports by orchestrating the metadata source and the
//! repository. Create and update map failures the same way.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    BookEntryInput, BookLogCommand, BookLogQuery, BookMetadata, BookMetadataSource,
    BookMetadataSourceError, BookRepository, BookRepositoryError,
};
use crate::domain::{Book, BookDetails, BookId, BookListQuery, Error};

/// Message returned when a book id has no row.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

#[derive(Debug, Clone, Copy)]
enum Operation {
    Add,
    Update,
    Delete,
    List,
    Read,
}

impl Operation {
    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Add => "Error adding book - ",
            Self::Update => "Error updating book - ",
            Self::Delete => "Error deleting book - ",
            Self::List => "Error listing books - ",
            Self::Read => "Error reading book - ",
        }
    }
}

fn map_repository_error(operation: Operation, error: BookRepositoryError) -> Error {
    match error {
        BookRepositoryError::NotFound { .. } => Error::not_found(NOT_FOUND_MESSAGE),
        other => Error::internal(format!("{}{other}", operation.failure_prefix())),
    }
}

fn map_metadata_error(operation: Operation, error: &BookMetadataSourceError) -> Error {
    Error::internal(format!("{}{error}", operation.failure_prefix()))
}

fn details_from(input: BookEntryInput, metadata: BookMetadata) -> BookDetails {
    let BookMetadata {
        title,
        author,
        external_id,
        cover_image_id,
    } = metadata;
    BookDetails {
        title,
        author,
        isbn: Some(input.isbn.into_inner()),
        external_id,
        cover_image_id,
        rating: input.rating,
        review: input.review,
        read_date: input.read_date,
    }
}

/// Book log service implementing both driving ports.
#[derive(Clone)]
pub struct BookLogService<R, M> {
    repository: Arc<R>,
    metadata: Arc<M>,
}

impl<R, M> BookLogService<R, M> {
    /// Create a service over a repository and a metadata source.
    pub fn new(repository: Arc<R>, metadata: Arc<M>) -> Self {
        Self {
            repository,
            metadata,
        }
    }
}

impl<R, M> BookLogService<R, M>
where
    R: BookRepository,
    M: BookMetadataSource,
{
    async fn resolve_details(
        &self,
        operation: Operation,
        input: BookEntryInput,
    ) -> Result<BookDetails, Error> {
        let metadata = self
            .metadata
            .fetch_metadata(&input.isbn)
            .await
            .map_err(|err| {
                warn!(isbn = %input.isbn, error = %err, "metadata lookup failed");
                map_metadata_error(operation, &err)
            })?;
        debug!(isbn = %input.isbn, title = %metadata.title, "metadata resolved");
        Ok(details_from(input, metadata))
    }
}

#[async_trait]
impl<R, M> BookLogCommand for BookLogService<R, M>
where
    R: BookRepository,
    M: BookMetadataSource,
{
    async fn create_book(&self, input: BookEntryInput) -> Result<Book, Error> {
        let details = self.resolve_details(Operation::Add, input).await?;
        let book = self
            .repository
            .insert(&details)
            .await
            .map_err(|err| map_repository_error(Operation::Add, err))?;
        info!(book_id = %book.id(), title = %book.title(), "book added");
        Ok(book)
    }

    async fn update_book(&self, id: BookId, input: BookEntryInput) -> Result<Book, Error> {
        let details = self.resolve_details(Operation::Update, input).await?;
        let book = self
            .repository
            .update(id, &details)
            .await
            .map_err(|err| map_repository_error(Operation::Update, err))?;
        info!(book_id = %id, title = %book.title(), "book updated");
        Ok(book)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| map_repository_error(Operation::Delete, err))?;
        info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, M> BookLogQuery for BookLogService<R, M>
where
    R: BookRepository,
    M: BookMetadataSource,
{
    async fn list_books(&self, query: BookListQuery) -> Result<Vec<Book>, Error> {
        self.repository
            .list(&query)
            .await
            .map_err(|err| map_repository_error(Operation::List, err))
    }

    async fn get_book(&self, id: BookId) -> Result<Book, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_repository_error(Operation::Read, err))?
            .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "book_log_service_tests.rs"]
mod tests;
