//! Filtering and ordering for the book list.

use std::fmt;
use std::str::FromStr;

/// Ordering applied to the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookSort {
    /// Title ascending.
    Alpha,
    /// Rating descending, unrated books last.
    Rating,
    /// Creation time descending.
    Recent,
}

impl BookSort {
    /// Query-string spelling of the ordering.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Rating => "rating",
            Self::Recent => "recent",
        }
    }
}

impl fmt::Display for BookSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort value that names no known ordering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order: {0}")]
pub struct UnknownSortError(String);

impl FromStr for BookSort {
    type Err = UnknownSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpha" => Ok(Self::Alpha),
            "rating" => Ok(Self::Rating),
            "recent" => Ok(Self::Recent),
            other => Err(UnknownSortError(other.to_owned())),
        }
    }
}

/// Filter and ordering for a list request.
///
/// # Examples
/// ```
/// use bookbyte::domain::{BookListQuery, BookSort};
///
/// let query = BookListQuery::new(Some("  ".to_owned()), Some(BookSort::Alpha));
/// assert_eq!(query.title_contains(), None);
/// assert_eq!(query.sort(), Some(BookSort::Alpha));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookListQuery {
    title_contains: Option<String>,
    sort: Option<BookSort>,
}

impl BookListQuery {
    /// Build a query; a blank title filter means no filter.
    pub fn new(title_contains: Option<String>, sort: Option<BookSort>) -> Self {
        let title_contains = title_contains.filter(|title| !title.trim().is_empty());
        Self {
            title_contains,
            sort,
        }
    }

    /// Case-insensitive title substring, if any.
    pub fn title_contains(&self) -> Option<&str> {
        self.title_contains.as_deref()
    }

    /// Requested ordering, if any.
    pub fn sort(&self) -> Option<BookSort> {
        self.sort
    }

    /// Whether `title` passes the filter.
    pub fn matches_title(&self, title: &str) -> bool {
        self.title_contains.as_deref().is_none_or(|needle| {
            title.to_lowercase().contains(needle.to_lowercase().as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("alpha", BookSort::Alpha)]
    #[case("rating", BookSort::Rating)]
    #[case("recent", BookSort::Recent)]
    fn sort_parses_known_values(#[case] input: &str, #[case] expected: BookSort) {
        assert_eq!(input.parse::<BookSort>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[rstest]
    #[case("Alpha")]
    #[case("newest")]
    #[case("")]
    fn sort_rejects_unknown_values(#[case] input: &str) {
        assert!(input.parse::<BookSort>().is_err());
    }

    #[rstest]
    #[case::exact("Great", "The Great Gatsby", true)]
    #[case::case_folded("great", "GREAT EXPECTATIONS", true)]
    #[case::absent("great", "Dune", false)]
    fn title_filter_is_case_insensitive(
        #[case] needle: &str,
        #[case] title: &str,
        #[case] expected: bool,
    ) {
        let query = BookListQuery::new(Some(needle.to_owned()), None);
        assert_eq!(query.matches_title(title), expected);
    }

    #[rstest]
    fn missing_filter_matches_everything() {
        let query = BookListQuery::default();
        assert!(query.matches_title("anything"));
    }
}
