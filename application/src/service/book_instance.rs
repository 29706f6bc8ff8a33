use std::collections::HashMap;

use error_stack::Report;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookInstanceQuery, BookQuery, DependOnBookInstanceQuery, DependOnBookQuery,
};
use kernel::interface::update::{BookInstanceModifier, DependOnBookInstanceModifier};
use kernel::prelude::entity::{
    BookId, BookInstance, BookInstanceDueBack, BookInstanceId, BookInstanceImprint,
};
use kernel::KernelError;

use crate::transfer::{
    BookDto, BookInstanceDto, BookInstanceFormDto, CreateBookInstanceDto, DeleteBookInstanceDto,
    GetBookInstanceDto, UpdateBookInstanceDto,
};

fn not_found(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::NotFound).attach_printable(format!("book instance {id}"))
}

fn missing_book(id: &Uuid) -> Report<KernelError> {
    Report::new(KernelError::Invalid).attach_printable(format!("book {id} does not exist"))
}

#[async_trait::async_trait]
pub trait GetBookInstanceService:
    'static + Sync + Send + DependOnBookInstanceQuery + DependOnBookQuery
{
    /// Every instance, each joined with the book it copies.
    async fn get_all_book_instances(
        &self,
    ) -> error_stack::Result<Vec<BookInstanceDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let instances = self.book_instance_query().find_all(&mut connection).await?;
        let books = self
            .book_query()
            .find_all(&mut connection)
            .await?
            .into_iter()
            .map(|book| (book.id().clone(), BookDto::from(book)))
            .collect::<HashMap<BookId, BookDto>>();

        Ok(instances
            .into_iter()
            .map(|instance| {
                let book = books.get(instance.book()).cloned();
                BookInstanceDto::with_book(instance, book)
            })
            .collect())
    }

    async fn get_book_instance(
        &self,
        dto: GetBookInstanceDto,
    ) -> error_stack::Result<BookInstanceDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookInstanceId::new(dto.id);
        let instance = self
            .book_instance_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&dto.id))?;
        let book = self
            .book_query()
            .find_by_id(&mut connection, instance.book())
            .await?
            .map(BookDto::from);

        Ok(BookInstanceDto::with_book(instance, book))
    }

    /// The instance to edit plus the books it can be reassigned to, ordered by title.
    async fn get_book_instance_form(
        &self,
        dto: GetBookInstanceDto,
    ) -> error_stack::Result<BookInstanceFormDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookInstanceId::new(dto.id);
        let instance = self
            .book_instance_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| not_found(&dto.id))?;
        let books = self
            .book_query()
            .find_all(&mut connection)
            .await?
            .into_iter()
            .map(BookDto::from)
            .collect::<Vec<_>>();
        let book_id: &Uuid = instance.book().as_ref();
        let book = books.iter().find(|book| &book.id == book_id).cloned();

        Ok(BookInstanceFormDto {
            book_instance: BookInstanceDto::with_book(instance, book),
            books,
        })
    }
}

impl<T> GetBookInstanceService for T where T: DependOnBookInstanceQuery + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookInstanceService:
    'static + Sync + Send + DependOnBookInstanceModifier + DependOnBookQuery
{
    async fn create_book_instance(
        &self,
        dto: CreateBookInstanceDto,
    ) -> error_stack::Result<BookInstanceDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book = self
            .book_query()
            .find_by_id(&mut connection, &BookId::new(dto.book))
            .await?
            .ok_or_else(|| missing_book(&dto.book))?;

        let instance = BookInstance::new(
            BookInstanceId::generate(),
            book.id().clone(),
            BookInstanceImprint::new(dto.imprint),
            dto.status,
            dto.due_back
                .map(BookInstanceDueBack::new)
                .unwrap_or_else(BookInstanceDueBack::now),
        );
        self.book_instance_modifier()
            .create(&mut connection, &instance)
            .await?;
        connection.commit().await?;

        tracing::debug!(id = %instance.id().as_ref(), "created book instance");
        Ok(BookInstanceDto::with_book(instance, Some(BookDto::from(book))))
    }
}

impl<T> CreateBookInstanceService for T where T: DependOnBookInstanceModifier + DependOnBookQuery {}

#[async_trait::async_trait]
pub trait UpdateBookInstanceService:
    'static + Sync + Send + DependOnBookInstanceModifier + DependOnBookInstanceQuery + DependOnBookQuery
{
    /// Replaces book, imprint, status and due-back date of an existing instance.
    async fn update_book_instance(
        &self,
        dto: UpdateBookInstanceDto,
    ) -> error_stack::Result<BookInstanceDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookInstanceId::new(dto.id);
        if self
            .book_instance_query()
            .find_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Err(not_found(&dto.id));
        }
        let book = self
            .book_query()
            .find_by_id(&mut connection, &BookId::new(dto.book))
            .await?
            .ok_or_else(|| missing_book(&dto.book))?;

        let instance = BookInstance::new(
            id,
            book.id().clone(),
            BookInstanceImprint::new(dto.imprint),
            dto.status,
            dto.due_back
                .map(BookInstanceDueBack::new)
                .unwrap_or_else(BookInstanceDueBack::now),
        );
        self.book_instance_modifier()
            .update(&mut connection, &instance)
            .await?;
        connection.commit().await?;

        tracing::debug!(id = %instance.id().as_ref(), "updated book instance");
        Ok(BookInstanceDto::with_book(instance, Some(BookDto::from(book))))
    }
}

impl<T> UpdateBookInstanceService for T where
    T: DependOnBookInstanceModifier + DependOnBookInstanceQuery + DependOnBookQuery
{
}

#[async_trait::async_trait]
pub trait DeleteBookInstanceService: 'static + Sync + Send + DependOnBookInstanceModifier {
    async fn delete_book_instance(
        &self,
        dto: DeleteBookInstanceDto,
    ) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookInstanceId::new(dto.id);
        self.book_instance_modifier()
            .delete(&mut connection, &id)
            .await?;
        connection.commit().await?;

        tracing::debug!(id = %dto.id, "deleted book instance");
        Ok(())
    }
}

impl<T> DeleteBookInstanceService for T where T: DependOnBookInstanceModifier {}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use error_stack::Report;
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{
        BookInstanceQuery, BookQuery, DependOnBookInstanceQuery, DependOnBookQuery,
    };
    use kernel::interface::update::{BookInstanceModifier, DependOnBookInstanceModifier};
    use kernel::prelude::entity::{
        AuthorId, Book, BookId, BookInstance, BookInstanceDueBack, BookInstanceId,
        BookInstanceImprint, BookInstanceStatus, BookTitle,
    };
    use kernel::KernelError;

    use super::{
        CreateBookInstanceService, DeleteBookInstanceService, GetBookInstanceService,
        UpdateBookInstanceService,
    };
    use crate::transfer::{
        CreateBookInstanceDto, DeleteBookInstanceDto, GetBookInstanceDto, UpdateBookInstanceDto,
    };

    /// Books and their copies, answering the way the postgres repositories do.
    #[derive(Clone, Default)]
    struct MemoryCatalog {
        books: Arc<Mutex<Vec<Book>>>,
        instances: Arc<Mutex<Vec<BookInstance>>>,
    }

    impl MemoryCatalog {
        fn with_book() -> (Self, Uuid) {
            let catalog = Self::default();
            let id = Uuid::now_v7();
            catalog.books.lock().unwrap().push(Book::new(
                BookId::new(id),
                BookTitle::new("The Left Hand of Darkness"),
                AuthorId::new(Uuid::now_v7()),
            ));
            (catalog, id)
        }

        fn with_instance() -> (Self, Uuid, Uuid) {
            let (catalog, book) = Self::with_book();
            let id = Uuid::now_v7();
            catalog.instances.lock().unwrap().push(BookInstance::new(
                BookInstanceId::new(id),
                BookId::new(book),
                BookInstanceImprint::new("Ace, 1969"),
                BookInstanceStatus::Available,
                BookInstanceDueBack::now(),
            ));
            (catalog, book, id)
        }
    }

    struct MemoryTransaction;

    #[async_trait::async_trait]
    impl Transaction for MemoryTransaction {
        async fn commit(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }

        async fn roll_back(self) -> error_stack::Result<(), KernelError> {
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl DatabaseConnection for MemoryCatalog {
        type Transaction = MemoryTransaction;
        async fn transact(&self) -> error_stack::Result<MemoryTransaction, KernelError> {
            Ok(MemoryTransaction)
        }

        async fn close(&self) {}
    }

    #[async_trait::async_trait]
    impl BookQuery for MemoryCatalog {
        type Transaction = MemoryTransaction;
        async fn find_by_id(
            &self,
            _: &mut MemoryTransaction,
            id: &BookId,
        ) -> error_stack::Result<Option<Book>, KernelError> {
            let books = self.books.lock().unwrap();
            Ok(books.iter().find(|book| book.id() == id).cloned())
        }

        async fn find_all(
            &self,
            _: &mut MemoryTransaction,
        ) -> error_stack::Result<Vec<Book>, KernelError> {
            Ok(self.books.lock().unwrap().clone())
        }
    }

    #[async_trait::async_trait]
    impl BookInstanceQuery for MemoryCatalog {
        type Transaction = MemoryTransaction;
        async fn find_by_id(
            &self,
            _: &mut MemoryTransaction,
            id: &BookInstanceId,
        ) -> error_stack::Result<Option<BookInstance>, KernelError> {
            let instances = self.instances.lock().unwrap();
            Ok(instances.iter().find(|instance| instance.id() == id).cloned())
        }

        async fn find_all(
            &self,
            _: &mut MemoryTransaction,
        ) -> error_stack::Result<Vec<BookInstance>, KernelError> {
            Ok(self.instances.lock().unwrap().clone())
        }
    }

    #[async_trait::async_trait]
    impl BookInstanceModifier for MemoryCatalog {
        type Transaction = MemoryTransaction;
        async fn create(
            &self,
            _: &mut MemoryTransaction,
            book_instance: &BookInstance,
        ) -> error_stack::Result<(), KernelError> {
            self.instances.lock().unwrap().push(book_instance.clone());
            Ok(())
        }

        async fn update(
            &self,
            _: &mut MemoryTransaction,
            book_instance: &BookInstance,
        ) -> error_stack::Result<(), KernelError> {
            let mut instances = self.instances.lock().unwrap();
            let stored = instances
                .iter_mut()
                .find(|instance| instance.id() == book_instance.id())
                .ok_or_else(|| Report::new(KernelError::NotFound))?;
            *stored = book_instance.clone();
            Ok(())
        }

        async fn delete(
            &self,
            _: &mut MemoryTransaction,
            id: &BookInstanceId,
        ) -> error_stack::Result<(), KernelError> {
            let mut instances = self.instances.lock().unwrap();
            let before = instances.len();
            instances.retain(|instance| instance.id() != id);
            if instances.len() == before {
                return Err(Report::new(KernelError::NotFound));
            }
            Ok(())
        }
    }

    impl DependOnBookQuery for MemoryCatalog {
        type BookQuery = Self;
        fn book_query(&self) -> &Self::BookQuery {
            self
        }
    }

    impl DependOnBookInstanceQuery for MemoryCatalog {
        type BookInstanceQuery = Self;
        fn book_instance_query(&self) -> &Self::BookInstanceQuery {
            self
        }
    }

    impl DependOnBookInstanceModifier for MemoryCatalog {
        type BookInstanceModifier = Self;
        fn book_instance_modifier(&self) -> &Self::BookInstanceModifier {
            self
        }
    }

    fn is_not_found<T>(result: &error_stack::Result<T, KernelError>) -> bool {
        matches!(result, Err(error) if matches!(error.current_context(), KernelError::NotFound))
    }

    fn is_invalid<T>(result: &error_stack::Result<T, KernelError>) -> bool {
        matches!(result, Err(error) if matches!(error.current_context(), KernelError::Invalid))
    }

    fn update(id: Uuid, book: Uuid) -> UpdateBookInstanceDto {
        UpdateBookInstanceDto {
            id,
            book,
            imprint: "Gollancz, 2017".to_string(),
            status: BookInstanceStatus::Loaned,
            due_back: None,
        }
    }

    #[tokio::test]
    async fn unknown_instance_is_not_found() {
        let (catalog, book, _) = MemoryCatalog::with_instance();
        let unknown = Uuid::now_v7();

        let detail = catalog
            .get_book_instance(GetBookInstanceDto { id: unknown })
            .await;
        assert!(is_not_found(&detail));

        let form = catalog
            .get_book_instance_form(GetBookInstanceDto { id: unknown })
            .await;
        assert!(is_not_found(&form));

        let updated = catalog.update_book_instance(update(unknown, book)).await;
        assert!(is_not_found(&updated));

        let deleted = catalog
            .delete_book_instance(DeleteBookInstanceDto { id: unknown })
            .await;
        assert!(is_not_found(&deleted));

        assert_eq!(catalog.instances.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_book_is_invalid() {
        let (catalog, _, id) = MemoryCatalog::with_instance();
        let unknown = Uuid::now_v7();

        let created = catalog
            .create_book_instance(CreateBookInstanceDto {
                book: unknown,
                imprint: "Tor, 2001".to_string(),
                status: BookInstanceStatus::Maintenance,
                due_back: None,
            })
            .await;
        assert!(is_invalid(&created));

        let updated = catalog.update_book_instance(update(id, unknown)).await;
        assert!(is_invalid(&updated));

        let instances = catalog.instances.lock().unwrap();
        assert_eq!(instances.len(), 1);
        let imprint: &String = instances[0].imprint().as_ref();
        assert_eq!(imprint, "Ace, 1969");
    }

    #[tokio::test]
    async fn known_instance_is_joined_updated_and_deleted() -> error_stack::Result<(), KernelError>
    {
        let (catalog, book, id) = MemoryCatalog::with_instance();

        let detail = catalog
            .get_book_instance(GetBookInstanceDto { id })
            .await?;
        assert_eq!(detail.book.map(|book| book.id), Some(book));

        let form = catalog
            .get_book_instance_form(GetBookInstanceDto { id })
            .await?;
        assert_eq!(form.books.len(), 1);

        let updated = catalog.update_book_instance(update(id, book)).await?;
        assert_eq!(updated.status, BookInstanceStatus::Loaned);
        assert_eq!(updated.imprint, "Gollancz, 2017");

        catalog
            .delete_book_instance(DeleteBookInstanceDto { id })
            .await?;
        assert!(catalog.instances.lock().unwrap().is_empty());
        Ok(())
    }
}
