use axum::response::Redirect;

use application::transfer::{AuthorDto, BookDto, BookInstanceDto};

use crate::controller::Exhaust;

pub const BOOK_INSTANCE_LIST: &str = "/catalog/bookinstances";

/// Sends the client on to the page of whatever was just written.
pub struct RedirectPresenter;

impl Exhaust<BookInstanceDto> for RedirectPresenter {
    type To = Redirect;
    fn emit(&self, input: BookInstanceDto) -> Self::To {
        Redirect::to(&input.url)
    }
}

impl Exhaust<AuthorDto> for RedirectPresenter {
    type To = Redirect;
    fn emit(&self, input: AuthorDto) -> Self::To {
        Redirect::to(&input.url)
    }
}

impl Exhaust<BookDto> for RedirectPresenter {
    type To = Redirect;
    fn emit(&self, input: BookDto) -> Self::To {
        Redirect::to(&input.url)
    }
}

impl Exhaust<()> for RedirectPresenter {
    type To = Redirect;
    fn emit(&self, _: ()) -> Self::To {
        Redirect::to(BOOK_INSTANCE_LIST)
    }
}
