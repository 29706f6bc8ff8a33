use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use uuid::Uuid;

use application::service::{
    CreateBookInstanceService, DeleteBookInstanceService, GetBookInstanceService, GetBookService,
    UpdateBookInstanceService,
};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    BookInstanceForm, BookInstanceTransformer, DeleteBookInstanceRequest, FieldError,
    GetBookInstanceRequest, RejectedBookInstance,
};
use crate::response::{
    BookInstanceFormResponse, BookInstancePresenter, BookInstanceResponse, RedirectPresenter,
    BOOK_INSTANCE_LIST, CREATE_TITLE, UPDATE_TITLE,
};

pub trait BookInstanceRouter {
    fn route_book_instance(self) -> Self;
}

async fn reject(
    module: &AppModule,
    title: &'static str,
    rejected: RejectedBookInstance,
) -> Result<Response, ErrorStatus> {
    tracing::debug!(
        fields = ?rejected.errors.iter().map(FieldError::path).collect::<Vec<_>>(),
        "book instance form refused"
    );
    let books = module.pgpool().get_all_books().await?;
    Ok(BookInstanceFormResponse::rejected(title, books, rejected).into_response())
}

/// A copy that is already gone sends the client back to the list.
fn confirm_delete(confirmation: Result<BookInstanceResponse, ErrorStatus>) -> Response {
    match confirmation {
        Ok(book_instance) => book_instance.into_response(),
        Err(error) if error.is_not_found() => Redirect::to(BOOK_INSTANCE_LIST).into_response(),
        Err(error) => error.into_response(),
    }
}

impl BookInstanceRouter for Router<AppModule> {
    fn route_book_instance(self) -> Self {
        self.route(
            "/catalog/bookinstances",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookInstancePresenter)
                    .bypass(|| async move { module.pgpool().get_all_book_instances().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/catalog/bookinstance/create",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), BookInstancePresenter)
                    .bypass(|| async move { module.pgpool().get_all_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Form(form): Form<BookInstanceForm>| async move {
                    let transformed = match Controller::new(
                        BookInstanceTransformer,
                        RedirectPresenter,
                    )
                    .try_intake(form)
                    {
                        Ok(transformed) => transformed,
                        Err(rejected) => return reject(&module, CREATE_TITLE, rejected).await,
                    };
                    transformed
                        .handle(|dto| async move {
                            module.pgpool().create_book_instance(dto).await
                        })
                        .await
                        .map(IntoResponse::into_response)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/catalog/bookinstance/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(BookInstanceTransformer, BookInstancePresenter)
                        .intake(GetBookInstanceRequest::new(id))
                        .handle(|dto| async move { module.pgpool().get_book_instance(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/catalog/bookinstance/:id/delete",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    let confirmation =
                        Controller::new(BookInstanceTransformer, BookInstancePresenter)
                            .intake(GetBookInstanceRequest::new(id))
                            .handle(|dto| async move {
                                module.pgpool().get_book_instance(dto).await
                            })
                            .await
                            .map_err(ErrorStatus::from);
                    confirm_delete(confirmation)
                },
            )
            .post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(BookInstanceTransformer, RedirectPresenter)
                        .intake(DeleteBookInstanceRequest::new(id))
                        .handle(|dto| async move {
                            module.pgpool().delete_book_instance(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/catalog/bookinstance/:id/update",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(BookInstanceTransformer, BookInstancePresenter)
                        .intake(GetBookInstanceRequest::new(id))
                        .handle(|dto| async move {
                            module.pgpool().get_book_instance_form(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Form(form): Form<BookInstanceForm>| async move {
                    let transformed = match Controller::new(
                        BookInstanceTransformer,
                        RedirectPresenter,
                    )
                    .try_intake((id, form))
                    {
                        Ok(transformed) => transformed,
                        Err(rejected) => return reject(&module, UPDATE_TITLE, rejected).await,
                    };
                    transformed
                        .handle(|dto| async move {
                            module.pgpool().update_book_instance(dto).await
                        })
                        .await
                        .map(IntoResponse::into_response)
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}

#[cfg(test)]
mod test {
    use axum::http::{header, StatusCode};
    use error_stack::Report;
    use kernel::KernelError;

    use super::confirm_delete;
    use crate::error::ErrorStatus;
    use crate::response::BOOK_INSTANCE_LIST;

    #[test]
    fn missing_copy_redirects_to_list() {
        let response = confirm_delete(Err(ErrorStatus::from(Report::new(KernelError::NotFound))));

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            BOOK_INSTANCE_LIST
        );
    }

    #[test]
    fn other_failures_keep_their_status() {
        let response = confirm_delete(Err(ErrorStatus::from(Report::new(KernelError::Internal))));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
