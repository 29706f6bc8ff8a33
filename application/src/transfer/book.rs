use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub url: String,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let url = value.url();
        let DestructBook { id, title, author } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            url,
        }
    }
}

#[derive(Debug)]
pub struct CreateBookDto {
    pub title: String,
    pub author: Uuid,
}
