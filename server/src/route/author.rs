use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Router};
use uuid::Uuid;

use application::service::{CreateAuthorService, GetAuthorService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{AuthorForm, AuthorTransformer, GetAuthorRequest};
use crate::response::{AuthorPresenter, RedirectPresenter, RejectedAuthorResponse};

pub trait AuthorRouter {
    fn route_author(self) -> Self;
}

impl AuthorRouter for Router<AppModule> {
    fn route_author(self) -> Self {
        self.route(
            "/catalog/authors",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), AuthorPresenter)
                    .bypass(|| async move { module.pgpool().get_all_authors().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/catalog/author/create",
            post(
                |State(module): State<AppModule>, Form(form): Form<AuthorForm>| async move {
                    let transformed =
                        match Controller::new(AuthorTransformer, RedirectPresenter).try_intake(form) {
                            Ok(transformed) => transformed,
                            Err(rejected) => {
                                return Ok(RejectedAuthorResponse::new(
                                    rejected.echo,
                                    rejected.errors,
                                )
                                .into_response())
                            }
                        };
                    transformed
                        .handle(|dto| async move { module.pgpool().create_author(dto).await })
                        .await
                        .map(IntoResponse::into_response)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/catalog/author/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(AuthorTransformer, AuthorPresenter)
                        .intake(GetAuthorRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_author(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
