mod author;
mod book;
mod book_instance;
mod redirect;

pub use self::{author::*, book::*, book_instance::*, redirect::*};
