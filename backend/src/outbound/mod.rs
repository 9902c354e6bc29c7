//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed book repository using Diesel ORM
//! - **openlibrary**: HTTP client for the Open Library metadata service
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod openlibrary;
pub mod persistence;
