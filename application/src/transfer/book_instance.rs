use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{BookInstance, BookInstanceStatus, DestructBookInstance};

use crate::transfer::BookDto;

#[derive(Debug, Clone)]
pub struct BookInstanceDto {
    pub id: Uuid,
    pub book_id: Uuid,
    /// The referenced book, when it was loaded alongside the instance.
    pub book: Option<BookDto>,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: OffsetDateTime,
    pub url: String,
    pub due_back_formatted: String,
    pub due_back_formatted_input: String,
}

impl BookInstanceDto {
    pub fn with_book(book_instance: BookInstance, book: Option<BookDto>) -> Self {
        let url = book_instance.url();
        let due_back_formatted = book_instance.due_back_formatted();
        let due_back_formatted_input = book_instance.due_back_formatted_input();
        let DestructBookInstance {
            id,
            book: book_id,
            imprint,
            status,
            due_back,
        } = book_instance.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            book,
            imprint: imprint.into(),
            status,
            due_back: due_back.into(),
            url,
            due_back_formatted,
            due_back_formatted_input,
        }
    }
}

impl From<BookInstance> for BookInstanceDto {
    fn from(value: BookInstance) -> Self {
        Self::with_book(value, None)
    }
}

/// A book instance together with every book it may be reassigned to.
#[derive(Debug, Clone)]
pub struct BookInstanceFormDto {
    pub book_instance: BookInstanceDto,
    pub books: Vec<BookDto>,
}

#[derive(Debug)]
pub struct GetBookInstanceDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateBookInstanceDto {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    /// Defaults to the time of creation.
    pub due_back: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct UpdateBookInstanceDto {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct DeleteBookInstanceDto {
    pub id: Uuid,
}
