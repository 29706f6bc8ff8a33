use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookInstance, BookInstanceId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookInstanceQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &BookInstanceId,
    ) -> error_stack::Result<Option<BookInstance>, KernelError>;
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<BookInstance>, KernelError>;
}

pub trait DependOnBookInstanceQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type BookInstanceQuery: BookInstanceQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_instance_query(&self) -> &Self::BookInstanceQuery;
}
