use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::AuthorDto;

use crate::controller::Exhaust;
use crate::request::{AuthorFormEcho, FieldError};

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    id: Uuid,
    first_name: String,
    family_name: String,
    name: String,
    url: String,
    date_of_birth_formatted: String,
    date_of_birth_formatted_input: String,
    date_of_death_formatted: String,
    date_of_death_formatted_input: String,
}

impl From<AuthorDto> for AuthorResponse {
    fn from(value: AuthorDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            family_name: value.family_name,
            name: value.name,
            url: value.url,
            date_of_birth_formatted: value.date_of_birth_formatted,
            date_of_birth_formatted_input: value.date_of_birth_formatted_input,
            date_of_death_formatted: value.date_of_death_formatted,
            date_of_death_formatted_input: value.date_of_death_formatted_input,
        }
    }
}

impl IntoResponse for AuthorResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct RejectedAuthorResponse {
    title: &'static str,
    author: AuthorFormEcho,
    errors: Vec<FieldError>,
}

impl RejectedAuthorResponse {
    pub fn new(author: AuthorFormEcho, errors: Vec<FieldError>) -> Self {
        Self {
            title: "Create Author",
            author,
            errors,
        }
    }
}

impl IntoResponse for RejectedAuthorResponse {
    fn into_response(self) -> Response {
        (axum::http::StatusCode::UNPROCESSABLE_ENTITY, Json(self)).into_response()
    }
}

pub struct AuthorPresenter;

impl Exhaust<AuthorDto> for AuthorPresenter {
    type To = AuthorResponse;
    fn emit(&self, input: AuthorDto) -> Self::To {
        AuthorResponse::from(input)
    }
}

impl Exhaust<Vec<AuthorDto>> for AuthorPresenter {
    type To = Json<Vec<AuthorResponse>>;
    fn emit(&self, input: Vec<AuthorDto>) -> Self::To {
        Json::from(input.into_iter().map(AuthorResponse::from).collect::<Vec<_>>())
    }
}
