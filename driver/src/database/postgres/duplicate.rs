use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::DuplicateQuery;
use kernel::interface::update::DuplicateModifier;
use kernel::prelude::entity::{DuplicateGroup, DuplicateTarget, RecordId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

/// Works on any table whose identifier column is a UUID. Table and column
/// names come from [`DuplicateTarget`], whose identifiers are validated
/// before they are quoted into the statement.
pub struct PostgresDuplicateRepository;

#[async_trait::async_trait]
impl DuplicateQuery for PostgresDuplicateRepository {
    type Transaction = PostgresTransaction;

    async fn find_duplicates(
        &self,
        con: &mut PostgresTransaction,
        target: &DuplicateTarget,
    ) -> error_stack::Result<Vec<DuplicateGroup>, KernelError> {
        PgDuplicateInternal::find_duplicates(con, target).await
    }
}

#[async_trait::async_trait]
impl DuplicateModifier for PostgresDuplicateRepository {
    type Transaction = PostgresTransaction;

    async fn delete_records(
        &self,
        con: &mut PostgresTransaction,
        target: &DuplicateTarget,
        ids: &[RecordId],
    ) -> error_stack::Result<u64, KernelError> {
        PgDuplicateInternal::delete_records(con, target, ids).await
    }
}

#[derive(sqlx::FromRow)]
struct DuplicateRow {
    value: Option<String>,
    ids: Vec<Uuid>,
}

impl From<DuplicateRow> for DuplicateGroup {
    fn from(value: DuplicateRow) -> Self {
        DuplicateGroup::new(
            value.value,
            value.ids.into_iter().map(RecordId::new).collect(),
        )
    }
}

pub(in crate::database) struct PgDuplicateInternal;

impl PgDuplicateInternal {
    async fn find_duplicates(
        con: &mut PgConnection,
        target: &DuplicateTarget,
    ) -> error_stack::Result<Vec<DuplicateGroup>, KernelError> {
        let table = target.table().quoted();
        let field = target.field().quoted();
        let id = target.id_column().quoted();
        // language=postgresql
        let statement = format!(
            r#"
            SELECT {field}::text AS value, array_agg({id} ORDER BY {id}) AS ids
            FROM {table}
            GROUP BY {field}
            HAVING count(*) > 1
            ORDER BY 1
            "#
        );
        let rows = sqlx::query_as::<_, DuplicateRow>(&statement)
            .fetch_all(con)
            .await
            .convert_error()?;
        Ok(rows.into_iter().map(DuplicateGroup::from).collect())
    }

    async fn delete_records(
        con: &mut PgConnection,
        target: &DuplicateTarget,
        ids: &[RecordId],
    ) -> error_stack::Result<u64, KernelError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let table = target.table().quoted();
        let id = target.id_column().quoted();
        // language=postgresql
        let statement = format!(
            r#"
            DELETE FROM {table}
            WHERE {id} = ANY($1)
            "#
        );
        let ids = ids.iter().copied().map(Uuid::from).collect::<Vec<_>>();
        let result = sqlx::query(&statement)
            .bind(ids)
            .execute(con)
            .await
            .convert_error()?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::DuplicateQuery;
    use kernel::interface::update::DuplicateModifier;
    use kernel::prelude::entity::{DuplicateTarget, Identifier, RecordId};
    use kernel::KernelError;
    use uuid::Uuid;

    use crate::database::postgres::{PostgresDatabase, PostgresDuplicateRepository};
    use crate::error::ConvertError;

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        sqlx::query(
            // language=postgresql
            r#"
            CREATE TEMPORARY TABLE dedupe_probe (id UUID PRIMARY KEY, email TEXT)
            ON COMMIT DROP
            "#,
        )
        .execute(&mut *con)
        .await
        .convert_error()?;

        let shared = format!("{}@x.com", rand::random::<u32>());
        let unique = format!("{}@y.com", rand::random::<u32>());
        let ids = (0..4).map(|_| Uuid::now_v7()).collect::<Vec<_>>();
        let rows = [
            (ids[0], Some(shared.clone())),
            (ids[1], Some(shared.clone())),
            (ids[2], Some(shared.clone())),
            (ids[3], Some(unique)),
        ];
        for (id, email) in rows {
            sqlx::query("INSERT INTO dedupe_probe (id, email) VALUES ($1, $2)")
                .bind(id)
                .bind(email)
                .execute(&mut *con)
                .await
                .convert_error()?;
        }

        let target = DuplicateTarget::new(
            Identifier::new("dedupe_probe")?,
            Identifier::new("email")?,
            Identifier::new("id")?,
        );
        let groups = PostgresDuplicateRepository
            .find_duplicates(&mut con, &target)
            .await?;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].value(), &Some(shared));
        let mut expected = ids[..3].iter().copied().map(RecordId::new).collect::<Vec<_>>();
        expected.sort();
        assert_eq!(groups[0].ids(), &expected);

        let (_, removed) = groups[0].partition().expect("group is not empty");
        let deleted = PostgresDuplicateRepository
            .delete_records(&mut con, &target, &removed)
            .await?;
        assert_eq!(deleted, 2);

        let groups = PostgresDuplicateRepository
            .find_duplicates(&mut con, &target)
            .await?;
        assert!(groups.is_empty());

        con.roll_back().await?;
        Ok(())
    }
}
