//! Form and query-string payloads accepted by the book pages.
//!
//! HTML forms submit every field as text, so the payloads here are plain
//! strings and parsing into domain types happens in one place before any
//! outbound call is made.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::ports::BookEntryInput;
use crate::domain::{Book, BookListQuery, BookSort, Error, Isbn, Rating};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields posted by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub isbn: String,
    pub rating: String,
    pub review: String,
    pub read_date: String,
}

impl BookForm {
    /// Pre-fill the form from a stored book.
    pub fn from_book(book: &Book) -> Self {
        let details = book.details();
        Self {
            isbn: details.isbn.clone().unwrap_or_default(),
            rating: details.rating.map(|r| r.to_string()).unwrap_or_default(),
            review: details.review.clone().unwrap_or_default(),
            read_date: details
                .read_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse the submitted text into a validated entry.
    ///
    /// Blank `rating`, `review` and `read_date` mean "absent".
    ///
    /// # Examples
    /// ```
    /// use bookbyte::inbound::http::forms::BookForm;
    ///
    /// let form = BookForm {
    ///     isbn: "0-451-52493-4".into(),
    ///     rating: "5".into(),
    ///     review: String::new(),
    ///     read_date: "2024-01-14".into(),
    /// };
    /// let entry = form.into_entry().expect("valid form");
    /// assert_eq!(entry.isbn.as_str(), "0451524934");
    /// assert!(entry.review.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] naming the first invalid field.
    pub fn into_entry(self) -> Result<BookEntryInput, Error> {
        let isbn: Isbn = self
            .isbn
            .parse()
            .map_err(|err| Error::invalid_request(format!("{err}")))?;

        let rating = non_blank(&self.rating)
            .map(|raw| {
                raw.parse::<Rating>().map_err(|_| {
                    Error::invalid_request(format!(
                        "rating must be a whole number between {} and {}, got '{raw}'",
                        Rating::MIN,
                        Rating::MAX
                    ))
                })
            })
            .transpose()?;

        let read_date = non_blank(&self.read_date)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                    Error::invalid_request(format!("read date must be YYYY-MM-DD, got '{raw}'"))
                })
            })
            .transpose()?;

        let review = non_blank(&self.review).is_some().then_some(self.review);

        Ok(BookEntryInput {
            isbn,
            rating,
            review,
            read_date,
        })
    }
}

/// Query string of the list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub title: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    /// Recognised sort order; anything else is ignored.
    pub fn sort_order(&self) -> Option<BookSort> {
        let raw = non_blank(self.sort.as_deref()?)?;
        match raw.parse() {
            Ok(sort) => Some(sort),
            Err(err) => {
                debug!(error = %err, "ignoring sort parameter");
                None
            }
        }
    }

    /// Build the domain query; a blank title is no filter.
    pub fn to_query(&self) -> BookListQuery {
        BookListQuery::new(self.title.clone(), self.sort_order())
    }
}

fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn form() -> BookForm {
        BookForm {
            isbn: "9780441172719".to_owned(),
            rating: "4".to_owned(),
            review: "Spice.".to_owned(),
            read_date: "2023-07-01".to_owned(),
        }
    }

    #[rstest]
    fn complete_form_parses(form: BookForm) {
        let entry = form.into_entry().expect("valid form");

        assert_eq!(entry.isbn.as_str(), "9780441172719");
        assert_eq!(entry.rating.map(Rating::value), Some(4));
        assert_eq!(entry.review.as_deref(), Some("Spice."));
        assert_eq!(entry.read_date, NaiveDate::from_ymd_opt(2023, 7, 1));
    }

    #[rstest]
    fn blank_optional_fields_are_absent(mut form: BookForm) {
        form.rating = " ".to_owned();
        form.review = "\n".to_owned();
        form.read_date = String::new();

        let entry = form.into_entry().expect("valid form");

        assert!(entry.rating.is_none());
        assert!(entry.review.is_none());
        assert!(entry.read_date.is_none());
    }

    #[rstest]
    #[case::isbn_blank("isbn", "  ", "ISBN is required")]
    #[case::isbn_letters("isbn", "abc", "ISBN may only contain")]
    #[case::rating_high("rating", "6", "got '6'")]
    #[case::rating_zero("rating", "0", "between 1 and 5")]
    #[case::rating_text("rating", "five", "got 'five'")]
    #[case::rating_fraction("rating", "4.5", "whole number")]
    #[case::date_format("read_date", "14/01/2024", "YYYY-MM-DD")]
    #[case::date_invalid("read_date", "2024-02-30", "YYYY-MM-DD")]
    fn invalid_fields_are_rejected(
        mut form: BookForm,
        #[case] field: &str,
        #[case] value: &str,
        #[case] expected: &str,
    ) {
        match field {
            "isbn" => form.isbn = value.to_owned(),
            "rating" => form.rating = value.to_owned(),
            "read_date" => form.read_date = value.to_owned(),
            _ => panic!("unknown field {field}"),
        }

        let error = form.into_entry().expect_err("invalid form");

        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        assert!(
            error.message().contains(expected),
            "'{}' should contain '{expected}'",
            error.message()
        );
    }

    #[rstest]
    #[case(Some("rating"), Some(BookSort::Rating))]
    #[case(Some("recent"), Some(BookSort::Recent))]
    #[case(Some("newest"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn list_params_ignore_unknown_sort(
        #[case] sort: Option<&str>,
        #[case] expected: Option<BookSort>,
    ) {
        let params = ListParams {
            title: None,
            sort: sort.map(str::to_owned),
        };
        assert_eq!(params.sort_order(), expected);
    }

    #[rstest]
    fn list_params_drop_blank_title() {
        let params = ListParams {
            title: Some("   ".to_owned()),
            sort: Some("alpha".to_owned()),
        };
        let query = params.to_query();
        assert_eq!(query.title_contains(), None);
        assert_eq!(query.sort(), Some(BookSort::Alpha));
    }
}
