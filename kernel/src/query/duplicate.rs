use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{DuplicateGroup, DuplicateTarget};
use crate::KernelError;

#[async_trait::async_trait]
pub trait DuplicateQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Groups the target table by its field and returns only the groups
    /// holding more than one row.
    async fn find_duplicates(
        &self,
        con: &mut Self::Transaction,
        target: &DuplicateTarget,
    ) -> error_stack::Result<Vec<DuplicateGroup>, KernelError>;
}

pub trait DependOnDuplicateQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type DuplicateQuery: DuplicateQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn duplicate_query(&self) -> &Self::DuplicateQuery;
}
