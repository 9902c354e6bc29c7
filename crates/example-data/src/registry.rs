//! Book catalogue types and JSON parsing.
//!
//! A catalogue is a versioned list of finished book entries. Entries carry
//! already-resolved metadata so seeding never needs the network.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CatalogueError;

/// Current supported catalogue version.
const SUPPORTED_VERSION: u32 = 1;

const RATING_MIN: i32 = 1;
const RATING_MAX: i32 = 5;

const BUNDLED_CATALOGUE: &str = include_str!("../data/demo_books.json");

/// One demonstration book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoBook {
    title: String,
    author: String,
    isbn: Option<String>,
    external_id: Option<String>,
    cover_image_id: Option<i64>,
    rating: Option<i32>,
    review: Option<String>,
    read_date: Option<NaiveDate>,
}

impl DemoBook {
    /// Returns the book title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author display name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the ISBN, if recorded.
    #[must_use]
    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    /// Returns the metadata-source identifier, if recorded.
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Returns the cover image identifier, if recorded.
    #[must_use]
    pub const fn cover_image_id(&self) -> Option<i64> {
        self.cover_image_id
    }

    /// Returns the rating in `1..=5`, if recorded.
    #[must_use]
    pub const fn rating(&self) -> Option<i32> {
        self.rating
    }

    /// Returns the free-text review, if recorded.
    #[must_use]
    pub fn review(&self) -> Option<&str> {
        self.review.as_deref()
    }

    /// Returns the date the book was finished, if recorded.
    #[must_use]
    pub const fn read_date(&self) -> Option<NaiveDate> {
        self.read_date
    }
}

/// A validated catalogue of demonstration books.
///
/// # Example
///
/// ```
/// use example_data::BookCatalogue;
///
/// let json = r#"{
///     "version": 1,
///     "books": [{"title": "Dune", "author": "Frank Herbert", "rating": 5}]
/// }"#;
///
/// let catalogue = BookCatalogue::from_json(json).expect("valid catalogue");
/// assert_eq!(catalogue.books().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCatalogue {
    version: u32,
    books: Vec<DemoBook>,
}

impl BookCatalogue {
    /// Parses a catalogue from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if:
    /// - The JSON is malformed or a date is not `YYYY-MM-DD`
    /// - The version is unsupported
    /// - The book list is empty
    /// - Any title or author is blank
    /// - Any rating lies outside `1..=5`
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let raw: RawCatalogue =
            serde_json::from_str(json).map_err(|e| CatalogueError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Returns the catalogue compiled into this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] only if the bundled data file is invalid.
    pub fn bundled() -> Result<Self, CatalogueError> {
        Self::from_json(BUNDLED_CATALOGUE)
    }

    fn from_raw(raw: RawCatalogue) -> Result<Self, CatalogueError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogueError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.books.is_empty() {
            return Err(CatalogueError::EmptyCatalogue);
        }

        let books = raw
            .books
            .into_iter()
            .enumerate()
            .map(|(index, book)| validate_book(index, book))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: raw.version,
            books,
        })
    }

    /// Returns the catalogue version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the books in catalogue order.
    #[must_use]
    pub fn books(&self) -> &[DemoBook] {
        &self.books
    }
}

fn validate_book(index: usize, raw: RawDemoBook) -> Result<DemoBook, CatalogueError> {
    let title = raw.title.trim();
    if title.is_empty() {
        return Err(CatalogueError::BlankTitle { index });
    }
    let author = raw.author.trim();
    if author.is_empty() {
        return Err(CatalogueError::BlankAuthor { index });
    }
    if let Some(rating) = raw.rating.filter(|r| !(RATING_MIN..=RATING_MAX).contains(r)) {
        return Err(CatalogueError::RatingOutOfRange { index, rating });
    }

    Ok(DemoBook {
        title: title.to_owned(),
        author: author.to_owned(),
        isbn: non_blank(raw.isbn),
        external_id: non_blank(raw.external_id),
        cover_image_id: raw.cover_image_id,
        rating: raw.rating,
        review: non_blank(raw.review),
        read_date: raw.read_date,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Raw JSON structure for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogue {
    version: u32,
    books: Vec<RawDemoBook>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDemoBook {
    title: String,
    author: String,
    #[serde(default)]
    isbn: Option<String>,
    #[serde(default)]
    external_id: Option<String>,
    #[serde(default)]
    cover_image_id: Option<i64>,
    #[serde(default)]
    rating: Option<i32>,
    #[serde(default)]
    review: Option<String>,
    #[serde(default)]
    read_date: Option<NaiveDate>,
}
