use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::BookDto;

use crate::controller::Exhaust;
use crate::request::{BookFormEcho, FieldError};

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: Uuid,
    url: String,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            author: value.author,
            url: value.url,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct RejectedBookResponse {
    title: &'static str,
    book: BookFormEcho,
    errors: Vec<FieldError>,
}

impl RejectedBookResponse {
    pub fn new(book: BookFormEcho, errors: Vec<FieldError>) -> Self {
        Self {
            title: "Create Book",
            book,
            errors,
        }
    }
}

impl IntoResponse for RejectedBookResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

pub struct BookPresenter;

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json::from(input.into_iter().map(BookResponse::from).collect::<Vec<_>>())
    }
}
