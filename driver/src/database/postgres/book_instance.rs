use error_stack::Report;
use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::BookInstanceQuery;
use kernel::interface::update::BookInstanceModifier;
use kernel::prelude::entity::{
    BookId, BookInstance, BookInstanceDueBack, BookInstanceId, BookInstanceImprint,
    BookInstanceStatus,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookInstanceRepository;

#[async_trait::async_trait]
impl BookInstanceQuery for PostgresBookInstanceRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookInstanceId,
    ) -> error_stack::Result<Option<BookInstance>, KernelError> {
        PgBookInstanceInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<BookInstance>, KernelError> {
        PgBookInstanceInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl BookInstanceModifier for PostgresBookInstanceRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInstanceInternal::create(con, book_instance).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInstanceInternal::update(con, book_instance).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        id: &BookInstanceId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInstanceInternal::delete(con, id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookInstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: OffsetDateTime,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = Report<KernelError>;
    fn try_from(value: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = value
            .status
            .parse::<BookInstanceStatus>()
            .map_err(|report| report.change_context(KernelError::Internal))?;
        Ok(BookInstance::new(
            BookInstanceId::new(value.id),
            BookId::new(value.book_id),
            BookInstanceImprint::new(value.imprint),
            status,
            BookInstanceDueBack::new(value.due_back),
        ))
    }
}

pub(in crate::database) struct PgBookInstanceInternal;

impl PgBookInstanceInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookInstanceId,
    ) -> error_stack::Result<Option<BookInstance>, KernelError> {
        let row = sqlx::query_as::<_, BookInstanceRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(BookInstance::try_from).transpose()
    }

    async fn find_all(
        con: &mut PgConnection,
    ) -> error_stack::Result<Vec<BookInstance>, KernelError> {
        let rows = sqlx::query_as::<_, BookInstanceRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, imprint, status, due_back
            FROM book_instances
            ORDER BY id
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(book_instance.id().as_ref())
        .bind(book_instance.book().as_ref())
        .bind(book_instance.imprint().as_ref())
        .bind(book_instance.status().as_str())
        .bind(OffsetDateTime::from(*book_instance.due_back()))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        book_instance: &BookInstance,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            "#,
        )
        .bind(book_instance.id().as_ref())
        .bind(book_instance.book().as_ref())
        .bind(book_instance.imprint().as_ref())
        .bind(book_instance.status().as_str())
        .bind(OffsetDateTime::from(*book_instance.due_back()))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book instance {}", book_instance.id().as_ref())));
        }
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        id: &BookInstanceId,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM book_instances
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(Report::new(KernelError::NotFound)
                .attach_printable(format!("book instance {}", id.as_ref())));
        }
        Ok(())
    }
}
