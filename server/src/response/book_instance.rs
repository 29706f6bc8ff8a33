use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{BookDto, BookInstanceDto, BookInstanceFormDto};
use kernel::prelude::entity::BookInstanceStatus;

use crate::controller::Exhaust;
use crate::request::{BookInstanceFormEcho, FieldError, RejectedBookInstance};
use crate::response::BookResponse;

#[derive(Debug, Serialize)]
pub struct BookInstanceResponse {
    id: Uuid,
    url: String,
    book: Option<BookResponse>,
    imprint: String,
    status: BookInstanceStatus,
    #[serde(with = "time::serde::rfc3339")]
    due_back: OffsetDateTime,
    due_back_formatted: String,
    due_back_formatted_input: String,
}

impl From<BookInstanceDto> for BookInstanceResponse {
    fn from(value: BookInstanceDto) -> Self {
        Self {
            id: value.id,
            url: value.url,
            book: value.book.map(BookResponse::from),
            imprint: value.imprint,
            status: value.status,
            due_back: value.due_back,
            due_back_formatted: value.due_back_formatted,
            due_back_formatted_input: value.due_back_formatted_input,
        }
    }
}

impl IntoResponse for BookInstanceResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Everything needed to render the create or update form of a book instance.
#[derive(Debug, Serialize)]
pub struct BookInstanceFormResponse<T> {
    #[serde(skip)]
    code: StatusCode,
    title: &'static str,
    book_list: Vec<BookResponse>,
    statuses: [BookInstanceStatus; 4],
    selected_book: Option<String>,
    bookinstance: Option<T>,
    errors: Vec<FieldError>,
}

impl<T: Serialize> IntoResponse for BookInstanceFormResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}

fn book_list(books: Vec<BookDto>) -> Vec<BookResponse> {
    books.into_iter().map(BookResponse::from).collect()
}

impl BookInstanceFormResponse<BookInstanceFormEcho> {
    pub fn rejected(
        title: &'static str,
        books: Vec<BookDto>,
        rejected: RejectedBookInstance,
    ) -> Self {
        let RejectedBookInstance { echo, errors } = rejected;
        Self {
            code: StatusCode::UNPROCESSABLE_ENTITY,
            title,
            book_list: book_list(books),
            statuses: BookInstanceStatus::ALL,
            selected_book: Some(echo.book.clone()).filter(|book| !book.is_empty()),
            bookinstance: Some(echo),
            errors,
        }
    }
}

pub const CREATE_TITLE: &str = "Create BookInstance";
pub const UPDATE_TITLE: &str = "Update BookInstance";

pub struct BookInstancePresenter;

impl Exhaust<Vec<BookInstanceDto>> for BookInstancePresenter {
    type To = Json<Vec<BookInstanceResponse>>;
    fn emit(&self, input: Vec<BookInstanceDto>) -> Self::To {
        Json::from(
            input
                .into_iter()
                .map(BookInstanceResponse::from)
                .collect::<Vec<_>>(),
        )
    }
}

impl Exhaust<BookInstanceDto> for BookInstancePresenter {
    type To = BookInstanceResponse;
    fn emit(&self, input: BookInstanceDto) -> Self::To {
        BookInstanceResponse::from(input)
    }
}

impl Exhaust<Vec<BookDto>> for BookInstancePresenter {
    type To = BookInstanceFormResponse<BookInstanceResponse>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        BookInstanceFormResponse {
            code: StatusCode::OK,
            title: CREATE_TITLE,
            book_list: book_list(input),
            statuses: BookInstanceStatus::ALL,
            selected_book: None,
            bookinstance: None,
            errors: Vec::new(),
        }
    }
}

impl Exhaust<BookInstanceFormDto> for BookInstancePresenter {
    type To = BookInstanceFormResponse<BookInstanceResponse>;
    fn emit(&self, input: BookInstanceFormDto) -> Self::To {
        let BookInstanceFormDto {
            book_instance,
            books,
        } = input;
        BookInstanceFormResponse {
            code: StatusCode::OK,
            title: UPDATE_TITLE,
            book_list: book_list(books),
            statuses: BookInstanceStatus::ALL,
            selected_book: Some(book_instance.book_id.to_string()),
            bookinstance: Some(BookInstanceResponse::from(book_instance)),
            errors: Vec::new(),
        }
    }
}
