//! Book log pages.
//!
//! ```text
//! GET  /            list, filtered by `title`, ordered by `sort`
//! GET  /create      empty form
//! POST /create      add a book, then 303 to /
//! GET  /book/{id}   detail
//! GET  /edit/{id}   pre-filled form
//! POST /edit/{id}   update a book, then 303 to /book/{id}
//! POST /delete/{id} remove a book, then 303 to /
//! ```

use actix_web::http::header::{ContentType, LOCATION};
use actix_web::{HttpResponse, get, post, web};
use tracing::debug;

use crate::domain::{BookId, Error, NOT_FOUND_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{BookForm, ListParams};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, FormTarget};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn see_other(location: String) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Register every book page and the extractor error policies on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use bookbyte::inbound::http::books;
///
/// let app = App::new().configure(books::configure);
/// # let _ = app;
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| {
                debug!(error = %err, "unparseable book id");
                Error::not_found(NOT_FOUND_MESSAGE).into()
            }),
    )
    .app_data(
        web::FormConfig::default().error_handler(|err, _req| {
            Error::invalid_request(format!("invalid form submission: {err}")).into()
        }),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _req| {
            Error::invalid_request(format!("invalid query string: {err}")).into()
        }),
    )
    .service(list_books)
    .service(new_book_form)
    .service(create_book)
    .service(show_book)
    .service(edit_book_form)
    .service(update_book)
    .service(delete_book);
}

/// List books, optionally filtered by title and ordered.
#[get("/")]
pub async fn list_books(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let books = state.queries.list_books(params.to_query()).await?;
    Ok(html(views::list_page(&books, &params)))
}

/// Render the empty create form.
#[get("/create")]
pub async fn new_book_form() -> HttpResponse {
    html(views::form_page(FormTarget::Create, &BookForm::default()))
}

/// Add a book from the submitted form.
#[post("/create")]
pub async fn create_book(
    state: web::Data<HttpState>,
    form: web::Form<BookForm>,
) -> ApiResult<HttpResponse> {
    let input = form.into_inner().into_entry()?;
    state.commands.create_book(input).await?;
    Ok(see_other("/".to_owned()))
}

/// Render one book.
#[get("/book/{id}")]
pub async fn show_book(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let book = state.queries.get_book(BookId::new(id.into_inner())).await?;
    Ok(html(views::book_page(&book)))
}

/// Render the edit form pre-filled from the stored book.
#[get("/edit/{id}")]
pub async fn edit_book_form(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let book = state.queries.get_book(BookId::new(id.into_inner())).await?;
    Ok(html(views::form_page(
        FormTarget::Edit(book.id()),
        &BookForm::from_book(&book),
    )))
}

/// Re-fetch metadata and overwrite a book.
#[post("/edit/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    form: web::Form<BookForm>,
) -> ApiResult<HttpResponse> {
    let id = BookId::new(id.into_inner());
    let input = form.into_inner().into_entry()?;
    let book = state.commands.update_book(id, input).await?;
    Ok(see_other(format!("/book/{}", book.id())))
}

/// Remove a book; missing ids still redirect.
#[post("/delete/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.commands.delete_book(BookId::new(id.into_inner())).await?;
    Ok(see_other("/".to_owned()))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
