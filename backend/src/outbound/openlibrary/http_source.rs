//! Reqwest-backed Open Library metadata adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into domain metadata. An edition is
//! fetched by ISBN, then its first author resource is fetched for a display
//! name.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{AuthorDto, EditionDto};
use crate::domain::ports::{BookMetadata, BookMetadataSource, BookMetadataSourceError};
use crate::domain::{Isbn, UNKNOWN_AUTHOR};

const USER_AGENT: &str = concat!("bookbyte/", env!("CARGO_PKG_VERSION"));

/// Open Library adapter performing GET requests against one base URL.
pub struct OpenLibrarySource {
    client: Client,
    base_url: Url,
}

impl OpenLibrarySource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use bookbyte::outbound::openlibrary::OpenLibrarySource;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://openlibrary.org").expect("valid url");
    /// let source = OpenLibrarySource::new(base, Duration::from_secs(10));
    /// assert!(source.is_ok());
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/isbn/{isbn}.json`
    fn edition_url(&self, isbn: &Isbn) -> Result<Url, BookMetadataSourceError> {
        self.resource_url(&["isbn", isbn.as_str()])
    }

    /// `{base}{key}.json` for a key such as `/authors/OL23919A`.
    fn author_url(&self, key: &str) -> Result<Url, BookMetadataSourceError> {
        let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(BookMetadataSourceError::decode(format!(
                "author reference '{key}' is not a resource path"
            )));
        }
        self.resource_url(&segments)
    }

    fn resource_url(&self, segments: &[&str]) -> Result<Url, BookMetadataSourceError> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(BookMetadataSourceError::invalid_request("empty resource path"));
        };
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                BookMetadataSourceError::invalid_request(format!(
                    "base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(parents)
            .push(&format!("{last}.json"));
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Result<T, StatusCode>, BookMetadataSourceError> {
        debug!(%url, "requesting book metadata");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            return Ok(Err(status));
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map(Ok)
            .map_err(|error| {
                BookMetadataSourceError::decode(format!("invalid Open Library JSON: {error}"))
            })
    }

    async fn fetch_author_name(&self, key: &str) -> Result<String, BookMetadataSourceError> {
        let url = self.author_url(key)?;
        let author: AuthorDto = self.get_json(url).await?.map_err(|status| {
            map_status_error(status, format!("author {key} not found").as_bytes())
        })?;
        Ok(author
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned()))
    }
}

#[async_trait]
impl BookMetadataSource for OpenLibrarySource {
    async fn fetch_metadata(&self, isbn: &Isbn) -> Result<BookMetadata, BookMetadataSourceError> {
        let url = self.edition_url(isbn)?;
        let edition: EditionDto = self
            .get_json(url)
            .await?
            .map_err(|_| BookMetadataSourceError::not_found(isbn.as_str()))?;

        let title = edition.title().map_err(BookMetadataSourceError::decode)?;
        let author = match edition.first_author_key() {
            Some(key) => self.fetch_author_name(key).await?,
            None => UNKNOWN_AUTHOR.to_owned(),
        };

        Ok(BookMetadata {
            title,
            author,
            external_id: edition.external_id(),
            cover_image_id: edition.cover_image_id(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> BookMetadataSourceError {
    if error.is_timeout() {
        BookMetadataSourceError::timeout(error.to_string())
    } else {
        BookMetadataSourceError::unreachable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> BookMetadataSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            BookMetadataSourceError::timeout(message)
        }
        _ if status.is_client_error() => BookMetadataSourceError::invalid_request(message),
        _ => BookMetadataSourceError::unreachable(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "http_source_tests.rs"]
mod tests;
