use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookInstance, BookInstanceId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait BookInstanceModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError>;
    /// Replaces every stored attribute of the instance with the same id.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError>;
    async fn delete(
        &self,
        con: &mut Self::Transaction,
        id: &BookInstanceId,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnBookInstanceModifier:
    'static + Sync + Send + DependOnDatabaseConnection
{
    type BookInstanceModifier: BookInstanceModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn book_instance_modifier(&self) -> &Self::BookInstanceModifier;
}
