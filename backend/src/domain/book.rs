//! Book log entries.
//!
//! A [`Book`] is the only persisted entity. Its identifier and creation
//! timestamp are assigned by storage; everything in [`BookDetails`] is
//! mutable and is overwritten wholesale on edit.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};

/// Author recorded when the metadata source names no author.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Storage-assigned book identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(i32);

impl BookId {
    /// Wrap a raw identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingError {
    value: i64,
}

impl RatingError {
    /// The rejected value.
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// Star rating in `1..=5`.
///
/// # Examples
/// ```
/// use bookbyte::domain::Rating;
///
/// let rating = Rating::try_from(4).expect("in range");
/// assert_eq!(rating.value(), 4);
/// assert!(Rating::try_from(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(i32);

impl Rating {
    /// Lowest accepted rating.
    pub const MIN: i32 = 1;
    /// Highest accepted rating.
    pub const MAX: i32 = 5;

    /// Raw rating value.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = RatingError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError {
                value: i64::from(value),
            })
        }
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Non-numeric input is reported as out of range with value 0.
        let value: i64 = s.trim().parse().map_err(|_| RatingError { value: 0 })?;
        i32::try_from(value)
            .map_err(|_| RatingError { value })
            .and_then(Self::try_from)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ISBN that cannot be used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IsbnError {
    /// Nothing left after removing spaces and hyphens.
    #[error("ISBN is required")]
    Missing,
    /// Contains something other than digits and `X`.
    #[error("ISBN may only contain digits, hyphens and X, got '{0}'")]
    InvalidCharacters(String),
}

/// ISBN normalised for lookup: spaces and hyphens removed, `x` upper-cased.
///
/// # Examples
/// ```
/// use bookbyte::domain::Isbn;
///
/// let isbn: Isbn = " 0-451-52493-4 ".parse().expect("valid ISBN");
/// assert_eq!(isbn.as_str(), "0451524934");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Normalised ISBN text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume into the normalised text.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if normalised.is_empty() {
            return Err(IsbnError::Missing);
        }
        if !normalised.chars().all(|c| c.is_ascii_digit() || c == 'X') {
            return Err(IsbnError::InvalidCharacters(s.trim().to_owned()));
        }
        Ok(Self(normalised))
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutable fields of a book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDetails {
    /// Title resolved from the metadata source.
    pub title: String,
    /// Author display name, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// ISBN supplied by the reader.
    pub isbn: Option<String>,
    /// Identifier assigned by the metadata source.
    pub external_id: Option<String>,
    /// Cover image reference in the metadata source's image store.
    pub cover_image_id: Option<i64>,
    /// Reader's rating.
    pub rating: Option<Rating>,
    /// Reader's review.
    pub review: Option<String>,
    /// Date the reader finished the book.
    pub read_date: Option<NaiveDate>,
}

/// A persisted book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    details: BookDetails,
    created_at: DateTime<Utc>,
}

impl Book {
    /// Assemble a persisted book from storage-assigned values.
    pub fn new(id: BookId, details: BookDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> BookId {
        self.id
    }

    /// Mutable fields.
    pub fn details(&self) -> &BookDetails {
        &self.details
    }

    /// Insertion timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Title shorthand.
    pub fn title(&self) -> &str {
        self.details.title.as_str()
    }
}
