mod id;
mod title;

pub use self::{id::*, title::*};
use crate::entity::AuthorId;
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: AuthorId,
}

impl Book {
    pub fn new(id: BookId, title: BookTitle, author: AuthorId) -> Self {
        Self { id, title, author }
    }

    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id.as_ref())
    }
}
