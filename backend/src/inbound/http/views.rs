//! Server-rendered HTML for the book pages.
//!
//! Every interpolated value passes through [`escape_html`]; nothing else in
//! this module touches user-supplied text.

use std::fmt::Write as _;

use crate::domain::{Book, BookId, BookSort};

use super::forms::{BookForm, ListParams};

const COVER_BASE_URL: &str = "https://covers.openlibrary.org/b/id";

/// Where a book form posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    /// `POST /create`
    Create,
    /// `POST /edit/{id}`
    Edit(BookId),
}

impl FormTarget {
    fn action(self) -> String {
        match self {
            Self::Create => "/create".to_owned(),
            Self::Edit(id) => format!("/edit/{id}"),
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Create => "Add a book",
            Self::Edit(_) => "Edit book",
        }
    }
}

/// Escape text for use in element content and quoted attribute values.
///
/// # Examples
/// ```
/// use bookbyte::inbound::http::views::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Medium-size cover image URL for an Open Library cover id.
pub fn cover_url(cover_image_id: i64) -> String {
    format!("{COVER_BASE_URL}/{cover_image_id}-M.jpg")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title} | BookByte</title>\n\
</head>\n\
<body>\n\
<header><a href=\"/\">BookByte</a> <a href=\"/create\">Add a book</a></header>\n\
<main>\n{body}</main>\n\
</body>\n\
</html>\n",
        title = escape_html(title),
    )
}

fn stars(book: &Book) -> String {
    book.details()
        .rating
        .map(|rating| {
            let filled = usize::try_from(rating.value()).unwrap_or_default();
            format!(
                "<span class=\"rating\" title=\"{rating} out of 5\">{}{}</span>",
                "\u{2605}".repeat(filled),
                "\u{2606}".repeat(5_usize.saturating_sub(filled)),
            )
        })
        .unwrap_or_else(|| "<span class=\"rating\">Not rated</span>".to_owned())
}

fn cover(book: &Book) -> String {
    book.details()
        .cover_image_id
        .map(|id| {
            format!(
                "<img class=\"cover\" src=\"{}\" alt=\"Cover of {}\">",
                escape_html(&cover_url(id)),
                escape_html(book.title())
            )
        })
        .unwrap_or_default()
}

fn sort_option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{value}\"{}>{label}</option>",
        if selected { " selected" } else { "" }
    )
}

/// List page with search box, sort selector and one card per book.
pub fn list_page(books: &[Book], params: &ListParams) -> String {
    let current_sort = params.sort_order();
    let mut body = String::new();

    let _ = write!(
        body,
        "<form method=\"get\" action=\"/\">\n\
<input type=\"search\" name=\"title\" placeholder=\"Search by title\" value=\"{}\">\n\
<select name=\"sort\">\n{}\n",
        escape_html(params.title.as_deref().unwrap_or_default()),
        sort_option("", "Default order", current_sort.is_none()),
    );
    for (sort, label) in [
        (BookSort::Alpha, "Title"),
        (BookSort::Rating, "Rating"),
        (BookSort::Recent, "Recently added"),
    ] {
        let _ = writeln!(
            body,
            "{}",
            sort_option(sort.as_str(), label, current_sort == Some(sort))
        );
    }
    body.push_str("</select>\n<button type=\"submit\">Search</button>\n</form>\n");

    if books.is_empty() {
        body.push_str("<p class=\"empty\">No books yet.</p>\n");
        return layout("My books", &body);
    }

    body.push_str("<ul class=\"books\">\n");
    for book in books {
        let details = book.details();
        let _ = writeln!(
            body,
            "<li>{cover}<a href=\"/book/{id}\">{title}</a> <span class=\"author\">{author}</span> {stars}</li>",
            cover = cover(book),
            id = book.id(),
            title = escape_html(&details.title),
            author = escape_html(&details.author),
            stars = stars(book),
        );
    }
    body.push_str("</ul>\n");

    layout("My books", &body)
}

/// Detail page for one book.
pub fn book_page(book: &Book) -> String {
    let details = book.details();
    let mut body = String::new();

    let _ = write!(
        body,
        "<article>\n{cover}\n<h1>{title}</h1>\n<p class=\"author\">{author}</p>\n<p>{stars}</p>\n<dl>\n",
        cover = cover(book),
        title = escape_html(&details.title),
        author = escape_html(&details.author),
        stars = stars(book),
    );
    if let Some(isbn) = &details.isbn {
        let _ = writeln!(body, "<dt>ISBN</dt><dd>{}</dd>", escape_html(isbn));
    }
    if let Some(read_date) = details.read_date {
        let _ = writeln!(body, "<dt>Read</dt><dd>{}</dd>", read_date.format("%Y-%m-%d"));
    }
    let _ = writeln!(
        body,
        "<dt>Added</dt><dd>{}</dd>",
        book.created_at().format("%Y-%m-%d")
    );
    body.push_str("</dl>\n");
    if let Some(review) = &details.review {
        let _ = writeln!(
            body,
            "<section class=\"review\" style=\"white-space: pre-line\">{}</section>",
            escape_html(review)
        );
    }
    let _ = write!(
        body,
        "<a href=\"/edit/{id}\">Edit</a>\n\
<form method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\n\
</article>\n",
        id = book.id(),
    );

    layout(&details.title, &body)
}

/// Create or edit form, pre-filled from `form`.
pub fn form_page(target: FormTarget, form: &BookForm) -> String {
    let body = format!(
        "<h1>{heading}</h1>\n\
<form method=\"post\" action=\"{action}\">\n\
<label>ISBN <input type=\"text\" name=\"isbn\" required value=\"{isbn}\"></label>\n\
<label>Rating <input type=\"number\" name=\"rating\" min=\"1\" max=\"5\" value=\"{rating}\"></label>\n\
<label>Read on <input type=\"date\" name=\"read_date\" value=\"{read_date}\"></label>\n\
<label>Review <textarea name=\"review\" rows=\"6\">{review}</textarea></label>\n\
<button type=\"submit\">Save</button>\n\
</form>\n",
        heading = target.heading(),
        action = target.action(),
        isbn = escape_html(&form.isbn),
        rating = escape_html(&form.rating),
        read_date = escape_html(&form.read_date),
        review = escape_html(&form.review),
    );
    layout(target.heading(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookDetails, Rating};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn book() -> Book {
        Book::new(
            BookId::new(3),
            BookDetails {
                title: "Dune <Deluxe>".to_owned(),
                author: "Frank Herbert".to_owned(),
                isbn: Some("9780441172719".to_owned()),
                external_id: Some("OL1M".to_owned()),
                cover_image_id: Some(12_345),
                rating: Rating::try_from(4).ok(),
                review: Some("<script>alert(1)</script>".to_owned()),
                read_date: NaiveDate::from_ymd_opt(2023, 7, 1),
            },
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).single().expect("valid time"),
        )
    }

    #[rstest]
    fn cover_url_uses_medium_size() {
        assert_eq!(
            cover_url(8_231_856),
            "https://covers.openlibrary.org/b/id/8231856-M.jpg"
        );
    }

    #[rstest]
    fn detail_page_escapes_user_text(book: Book) {
        let html = book_page(&book);

        assert!(html.contains("Dune &lt;Deluxe&gt;"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("https://covers.openlibrary.org/b/id/12345-M.jpg"));
        assert!(html.contains("action=\"/delete/3\""));
        assert!(html.contains("href=\"/edit/3\""));
        assert!(html.contains("2023-07-01"));
    }

    #[rstest]
    fn detail_page_omits_missing_cover(book: Book) {
        let book = Book::new(
            book.id(),
            BookDetails {
                cover_image_id: None,
                ..book.details().clone()
            },
            book.created_at(),
        );
        assert!(!book_page(&book).contains("<img"));
    }

    #[rstest]
    fn list_page_echoes_query_and_sort(book: Book) {
        let params = ListParams {
            title: Some("\"dune\"".to_owned()),
            sort: Some("rating".to_owned()),
        };

        let html = list_page(&[book], &params);

        assert!(html.contains("value=\"&quot;dune&quot;\""));
        assert!(html.contains("<option value=\"rating\" selected>"));
        assert!(!html.contains("<option value=\"alpha\" selected>"));
        assert!(html.contains("href=\"/book/3\""));
        assert!(html.contains("\u{2605}\u{2605}\u{2605}\u{2605}\u{2606}"));
    }

    #[rstest]
    fn empty_list_shows_placeholder() {
        let html = list_page(&[], &ListParams::default());
        assert!(html.contains("No books yet."));
        assert!(html.contains("<option value=\"\" selected>"));
    }

    #[rstest]
    fn edit_form_posts_to_book_and_prefills(book: Book) {
        let html = form_page(FormTarget::Edit(book.id()), &BookForm::from_book(&book));

        assert!(html.contains("action=\"/edit/3\""));
        assert!(html.contains("value=\"9780441172719\""));
        assert!(html.contains("name=\"rating\" min=\"1\" max=\"5\" value=\"4\""));
        assert!(html.contains("value=\"2023-07-01\""));
    }

    #[rstest]
    fn create_form_is_empty() {
        let html = form_page(FormTarget::Create, &BookForm::default());
        assert!(html.contains("action=\"/create\""));
        assert!(html.contains("name=\"isbn\" required value=\"\""));
    }
}
