use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Router};

use application::service::{CreateBookService, GetBookService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{BookForm, BookTransformer};
use crate::response::{BookPresenter, RedirectPresenter, RejectedBookResponse};

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/catalog/books",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookPresenter)
                    .bypass(|| async move { module.pgpool().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/catalog/book/create",
            post(
                |State(module): State<AppModule>, Form(form): Form<BookForm>| async move {
                    let transformed =
                        match Controller::new(BookTransformer, RedirectPresenter).try_intake(form) {
                            Ok(transformed) => transformed,
                            Err(rejected) => {
                                return Ok(RejectedBookResponse::new(
                                    rejected.echo,
                                    rejected.errors,
                                )
                                .into_response())
                            }
                        };
                    transformed
                        .handle(|dto| async move { module.pgpool().create_book(dto).await })
                        .await
                        .map(IntoResponse::into_response)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
