//! Demonstration book seeding.
//!
//! Converts the example-data catalogue into domain book details and delegates
//! the "only when empty" write to the repository port.

use std::sync::Arc;

use example_data::{BookCatalogue, DemoBook};
use thiserror::Error;

use crate::domain::ports::{BookRepository, BookRepositoryError, SeedingResult};
use crate::domain::{BookDetails, Rating, RatingError};

/// Result of attempting to seed demonstration books.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSeedOutcome {
    /// Number of books in the catalogue offered to the repository.
    pub book_count: usize,
    /// Persistence outcome.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying demonstration books.
#[derive(Debug, Error)]
pub enum DemoSeedingError {
    /// A catalogue rating does not fit the domain range.
    #[error("catalogue book '{title}' has an invalid rating: {source}")]
    InvalidRating {
        /// Title of the offending entry.
        title: String,
        /// Underlying range error.
        #[source]
        source: RatingError,
    },
    /// Persistence adapter failed while seeding.
    #[error("demo book persistence error: {0}")]
    Persistence(#[from] BookRepositoryError),
}

/// Service that seeds an empty book table from a catalogue.
#[derive(Clone)]
pub struct DemoBookSeeder<R> {
    repository: Arc<R>,
}

impl<R> DemoBookSeeder<R> {
    /// Create a new seeder with the given persistence adapter.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DemoBookSeeder<R>
where
    R: BookRepository,
{
    /// Insert the catalogue when the table is empty.
    ///
    /// Calling this twice leaves the same rows as calling it once.
    ///
    /// # Errors
    ///
    /// Returns [`DemoSeedingError`] if a catalogue entry fails domain
    /// validation or persistence fails.
    pub async fn seed_from_catalogue(
        &self,
        catalogue: &BookCatalogue,
    ) -> Result<DemoSeedOutcome, DemoSeedingError> {
        let books = catalogue
            .books()
            .iter()
            .map(convert_demo_book)
            .collect::<Result<Vec<_>, _>>()?;

        let result = self.repository.seed_if_empty(&books).await?;

        Ok(DemoSeedOutcome {
            book_count: books.len(),
            result,
        })
    }
}

fn convert_demo_book(book: &DemoBook) -> Result<BookDetails, DemoSeedingError> {
    let rating = book
        .rating()
        .map(Rating::try_from)
        .transpose()
        .map_err(|source| DemoSeedingError::InvalidRating {
            title: book.title().to_owned(),
            source,
        })?;

    Ok(BookDetails {
        title: book.title().to_owned(),
        author: book.author().to_owned(),
        isbn: book.isbn().map(str::to_owned),
        external_id: book.external_id().map(str::to_owned),
        cover_image_id: book.cover_image_id(),
        rating,
        review: book.review().map(str::to_owned),
        read_date: book.read_date(),
    })
}
