use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, BookQuery, DependOnAuthorQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{AuthorId, Book, BookId, BookTitle};
use kernel::KernelError;

use crate::transfer::{BookDto, CreateBookDto};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_all_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookModifier + DependOnAuthorQuery
{
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let author = AuthorId::new(dto.author);
        if self
            .author_query()
            .find_by_id(&mut connection, &author)
            .await?
            .is_none()
        {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable(format!("author {} does not exist", dto.author)));
        }

        let book = Book::new(BookId::generate(), BookTitle::new(dto.title), author);
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        tracing::debug!(id = %book.id().as_ref(), "created book");
        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier + DependOnAuthorQuery {}
