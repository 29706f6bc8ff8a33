use sqlx::PgConnection;
use time::Date;
use uuid::Uuid;

use kernel::interface::query::AuthorQuery;
use kernel::interface::update::AuthorModifier;
use kernel::prelude::entity::{
    Author, AuthorBirthDate, AuthorDeathDate, AuthorFamilyName, AuthorFirstName, AuthorId,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresAuthorRepository;

#[async_trait::async_trait]
impl AuthorQuery for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        PgAuthorInternal::find_by_id(con, id).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Author>, KernelError> {
        PgAuthorInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl AuthorModifier for PostgresAuthorRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        PgAuthorInternal::create(con, author).await
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: Uuid,
    first_name: String,
    family_name: String,
    date_of_birth: Option<Date>,
    date_of_death: Option<Date>,
}

impl From<AuthorRow> for Author {
    fn from(value: AuthorRow) -> Self {
        Author::new(
            AuthorId::new(value.id),
            AuthorFirstName::new(value.first_name),
            AuthorFamilyName::new(value.family_name),
            value.date_of_birth.map(AuthorBirthDate::new),
            value.date_of_death.map(AuthorDeathDate::new),
        )
    }
}

pub(in crate::database) struct PgAuthorInternal;

impl PgAuthorInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &AuthorId,
    ) -> error_stack::Result<Option<Author>, KernelError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Author::from))
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Author>, KernelError> {
        let rows = sqlx::query_as::<_, AuthorRow>(
            // language=postgresql
            r#"
            SELECT id, first_name, family_name, date_of_birth, date_of_death
            FROM authors
            ORDER BY family_name, first_name
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn create(
        con: &mut PgConnection,
        author: &Author,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(author.id().as_ref())
        .bind(author.first_name().as_ref())
        .bind(author.family_name().as_ref())
        .bind(author.date_of_birth().as_ref().map(|date| Date::from(*date)))
        .bind(author.date_of_death().as_ref().map(|date| Date::from(*date)))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::AuthorQuery;
    use kernel::interface::update::AuthorModifier;
    use kernel::prelude::entity::{
        Author, AuthorBirthDate, AuthorDeathDate, AuthorFamilyName, AuthorFirstName, AuthorId,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresAuthorRepository, PostgresDatabase};

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        let mut con = db.transact().await?;

        let id = AuthorId::generate();
        let author = Author::new(
            id.clone(),
            AuthorFirstName::new("Jane"),
            AuthorFamilyName::new("Austen"),
            Some(AuthorBirthDate::new(date!(1775 - 12 - 16))),
            Some(AuthorDeathDate::new(date!(1817 - 07 - 18))),
        );
        PostgresAuthorRepository.create(&mut con, &author).await?;

        let found = PostgresAuthorRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(author.clone()));

        let all = PostgresAuthorRepository.find_all(&mut con).await?;
        assert!(all.contains(&author));

        con.roll_back().await?;
        Ok(())
    }
}
