//! Open Library outbound adapter.
//!
//! This module provides a thin HTTP implementation of the
//! `BookMetadataSource` port.

mod dto;
mod http_source;

pub use http_source::OpenLibrarySource;
