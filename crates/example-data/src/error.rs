//! Error types for the example-data crate.
//!
//! Catalogue parsing reports one semantic variant per failure so callers can
//! surface precise start-up diagnostics.

use thiserror::Error;

/// Errors that can occur when parsing a demonstration book catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue JSON is malformed or missing required fields.
    #[error("invalid catalogue JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalogue version is not supported.
    #[error("unsupported catalogue version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the catalogue.
        actual: u32,
    },

    /// The catalogue contains no books.
    #[error("catalogue contains no books")]
    EmptyCatalogue,

    /// A book has a blank title.
    #[error("book at index {index} has a blank title")]
    BlankTitle {
        /// Index of the offending book.
        index: usize,
    },

    /// A book has a blank author.
    #[error("book at index {index} has a blank author")]
    BlankAuthor {
        /// Index of the offending book.
        index: usize,
    },

    /// A book carries a rating outside 1 to 5.
    #[error("book at index {index} has rating {rating}; expected 1..=5")]
    RatingOutOfRange {
        /// Index of the offending book.
        index: usize,
        /// The rejected rating.
        rating: i32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_formats_correctly() {
        let err = CatalogueError::ParseError {
            message: "unexpected token".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid catalogue JSON: unexpected token");
    }

    #[test]
    fn version_error_formats_correctly() {
        let err = CatalogueError::UnsupportedVersion {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "unsupported catalogue version: expected 1, found 2"
        );
    }

    #[test]
    fn rating_error_names_index_and_value() {
        let err = CatalogueError::RatingOutOfRange {
            index: 3,
            rating: 9,
        };
        assert_eq!(
            err.to_string(),
            "book at index 3 has rating 9; expected 1..=5"
        );
    }
}
