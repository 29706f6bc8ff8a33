mod author;
mod book;
mod book_instance;
mod common;
mod duplicate;

pub use self::{author::*, book::*, book_instance::*, common::*, duplicate::*};
