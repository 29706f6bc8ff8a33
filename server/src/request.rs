mod author;
mod book;
mod book_instance;
mod form;

pub use self::{author::*, book::*, book_instance::*, form::FieldError};
