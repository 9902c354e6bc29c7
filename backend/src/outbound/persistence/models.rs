//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::domain::{Book, BookDetails, BookId, Rating};

use super::schema::books;

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub external_id: Option<String>,
    pub cover_image_id: Option<i64>,
    pub rating: Option<i32>,
    pub review: Option<String>,
    pub read_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl BookRow {
    /// Convert the row into a domain book.
    ///
    /// Fails when a stored rating escaped the check constraint.
    pub(crate) fn into_domain(self) -> Result<Book, String> {
        let rating = self
            .rating
            .map(Rating::try_from)
            .transpose()
            .map_err(|err| format!("book {} has {err}", self.id))?;
        let details = BookDetails {
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            external_id: self.external_id,
            cover_image_id: self.cover_image_id,
            rating,
            review: self.review,
            read_date: self.read_date,
        };
        Ok(Book::new(BookId::new(self.id), details, self.created_at))
    }
}

/// Insertable struct for creating new book records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = books)]
pub(crate) struct NewBookRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub isbn: Option<&'a str>,
    pub external_id: Option<&'a str>,
    pub cover_image_id: Option<i64>,
    pub rating: Option<i32>,
    pub review: Option<&'a str>,
    pub read_date: Option<NaiveDate>,
}

impl<'a> From<&'a BookDetails> for NewBookRow<'a> {
    fn from(details: &'a BookDetails) -> Self {
        Self {
            title: &details.title,
            author: &details.author,
            isbn: details.isbn.as_deref(),
            external_id: details.external_id.as_deref(),
            cover_image_id: details.cover_image_id,
            rating: details.rating.map(Rating::value),
            review: details.review.as_deref(),
            read_date: details.read_date,
        }
    }
}

/// Changeset overwriting every mutable column; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BookChangeset<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub isbn: Option<&'a str>,
    pub external_id: Option<&'a str>,
    pub cover_image_id: Option<i64>,
    pub rating: Option<i32>,
    pub review: Option<&'a str>,
    pub read_date: Option<NaiveDate>,
}

impl<'a> From<&'a BookDetails> for BookChangeset<'a> {
    fn from(details: &'a BookDetails) -> Self {
        let row = NewBookRow::from(details);
        Self {
            title: row.title,
            author: row.author,
            isbn: row.isbn,
            external_id: row.external_id,
            cover_image_id: row.cover_image_id,
            rating: row.rating,
            review: row.review,
            read_date: row.read_date,
        }
    }
}
