//! DTOs for decoding Open Library JSON responses.
//!
//! Only the fields the book log uses are modelled; everything else in the
//! edition and author documents is ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct EditionDto {
    pub(super) title: Option<String>,
    /// Self path such as `/books/OL7353617M`.
    pub(super) key: Option<String>,
    #[serde(default)]
    pub(super) authors: Vec<AuthorRefDto>,
    #[serde(default)]
    pub(super) covers: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorRefDto {
    /// Resource path such as `/authors/OL23919A`.
    pub(super) key: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthorDto {
    pub(super) name: Option<String>,
}

impl EditionDto {
    pub(super) fn title(&self) -> Result<String, String> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| "edition has no title".to_owned())
    }

    /// Path of the first listed author, if any.
    pub(super) fn first_author_key(&self) -> Option<&str> {
        self.authors
            .first()
            .map(|author| author.key.as_str())
            .filter(|key| !key.trim().is_empty())
    }

    /// Last `/`-separated segment of the edition key.
    pub(super) fn external_id(&self) -> Option<String> {
        self.key
            .as_deref()
            .and_then(|key| key.rsplit('/').next())
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
    }

    /// First usable cover id; Open Library pads missing covers with `-1`.
    pub(super) fn cover_image_id(&self) -> Option<i64> {
        self.covers.iter().copied().find(|id| *id > 0)
    }
}
