mod author;
mod book;
mod book_instance;
mod reconcile;

pub use self::{author::*, book::*, book_instance::*, reconcile::*};
