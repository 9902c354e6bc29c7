//! Diesel table definitions for the PostgreSQL schema.
//!
//! This definition must match the DDL in
//! [`DieselBookRepository::ensure_schema`](super::DieselBookRepository)
//! exactly.

diesel::table! {
    /// Reading log entries.
    books (id) {
        /// Server-assigned serial key.
        id -> Int4,
        title -> Text,
        author -> Text,
        /// Normalised ISBN as submitted by the reader.
        isbn -> Nullable<Text>,
        /// Edition identifier from the metadata service.
        external_id -> Nullable<Text>,
        cover_image_id -> Nullable<Int8>,
        /// 1..=5, enforced by `books_rating_check`.
        rating -> Nullable<Int4>,
        review -> Nullable<Text>,
        read_date -> Nullable<Date>,
        created_at -> Timestamptz,
    }
}
