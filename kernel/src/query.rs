mod author;
mod book;
mod book_instance;
mod duplicate;

pub use self::{author::*, book::*, book_instance::*, duplicate::*};
