use std::ops::{Deref, DerefMut};

use error_stack::ResultExt;
use sqlx::{PgConnection, Pool, Postgres};

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnAuthorQuery, DependOnBookInstanceQuery, DependOnBookQuery, DependOnDuplicateQuery,
};
use kernel::interface::update::{
    DependOnAuthorModifier, DependOnBookInstanceModifier, DependOnBookModifier,
    DependOnDuplicateModifier,
};
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

pub use self::{author::*, book::*, book_instance::*, duplicate::*};

mod author;
mod book;
mod book_instance;
mod duplicate;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        sqlx::migrate!()
            .run(&pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| "Failed to apply database migrations")?;
        tracing::debug!("connected to postgres and applied migrations");
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnAuthorQuery for PostgresDatabase {
    type AuthorQuery = PostgresAuthorRepository;
    fn author_query(&self) -> &Self::AuthorQuery {
        &PostgresAuthorRepository
    }
}

impl DependOnAuthorModifier for PostgresDatabase {
    type AuthorModifier = PostgresAuthorRepository;
    fn author_modifier(&self) -> &Self::AuthorModifier {
        &PostgresAuthorRepository
    }
}

impl DependOnBookInstanceQuery for PostgresDatabase {
    type BookInstanceQuery = PostgresBookInstanceRepository;
    fn book_instance_query(&self) -> &Self::BookInstanceQuery {
        &PostgresBookInstanceRepository
    }
}

impl DependOnBookInstanceModifier for PostgresDatabase {
    type BookInstanceModifier = PostgresBookInstanceRepository;
    fn book_instance_modifier(&self) -> &Self::BookInstanceModifier {
        &PostgresBookInstanceRepository
    }
}

impl DependOnDuplicateQuery for PostgresDatabase {
    type DuplicateQuery = PostgresDuplicateRepository;
    fn duplicate_query(&self) -> &Self::DuplicateQuery {
        &PostgresDuplicateRepository
    }
}

impl DependOnDuplicateModifier for PostgresDatabase {
    type DuplicateModifier = PostgresDuplicateRepository;
    fn duplicate_modifier(&self) -> &Self::DuplicateModifier {
        &PostgresDuplicateRepository
    }
}
