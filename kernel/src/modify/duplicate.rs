use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{DuplicateTarget, RecordId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait DuplicateModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    /// Deletes the given rows of the target table, returning how many were removed.
    async fn delete_records(
        &self,
        con: &mut Self::Transaction,
        target: &DuplicateTarget,
        ids: &[RecordId],
    ) -> error_stack::Result<u64, KernelError>;
}

pub trait DependOnDuplicateModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type DuplicateModifier: DuplicateModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn duplicate_modifier(&self) -> &Self::DuplicateModifier;
}
