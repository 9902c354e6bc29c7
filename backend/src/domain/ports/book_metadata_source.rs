//! Driven port for bibliographic metadata lookups keyed by ISBN.
//!
//! The domain owns the normalised record so adapters for different
//! bibliographic services stay interchangeable.

use async_trait::async_trait;

use crate::domain::Isbn;

use super::define_port_error;

/// Normalised metadata for one edition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    /// Edition title.
    pub title: String,
    /// First author's display name, or [`crate::domain::UNKNOWN_AUTHOR`].
    pub author: String,
    /// Trailing path segment of the source's own record identifier.
    pub external_id: Option<String>,
    /// First cover image identifier.
    pub cover_image_id: Option<i64>,
}

define_port_error! {
    /// Errors surfaced while calling the metadata service.
    pub enum BookMetadataSourceError {
        /// The service has no record for the ISBN.
        NotFound { isbn: String } =>
            "no book found for ISBN {isbn}",
        /// Network transport failed or the service answered with a server error.
        Unreachable { message: String } =>
            "metadata service unreachable: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "metadata service timed out: {message}",
        /// The response did not have the expected shape.
        Decode { message: String } =>
            "metadata response could not be decoded: {message}",
        /// The adapter rejected the request before sending it.
        InvalidRequest { message: String } =>
            "metadata request invalid: {message}",
    }
}

/// Port for resolving an ISBN to edition metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookMetadataSource: Send + Sync {
    /// Fetch metadata for one ISBN.
    ///
    /// Resolves the author through a secondary lookup when the edition
    /// references one.
    async fn fetch_metadata(&self, isbn: &Isbn) -> Result<BookMetadata, BookMetadataSourceError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn messages_distinguish_missing_from_unreachable() {
        let missing = BookMetadataSourceError::not_found("0451524934").to_string();
        let unreachable = BookMetadataSourceError::unreachable("dns error").to_string();
        assert_ne!(missing, unreachable);
        assert_eq!(missing, "no book found for ISBN 0451524934");
    }
}
