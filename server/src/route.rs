mod author;
mod book;
mod book_instance;

pub use self::{author::*, book::*, book_instance::*};
