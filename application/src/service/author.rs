use error_stack::Report;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{AuthorQuery, DependOnAuthorQuery};
use kernel::interface::update::{AuthorModifier, DependOnAuthorModifier};
use kernel::prelude::entity::{
    Author, AuthorBirthDate, AuthorDeathDate, AuthorFamilyName, AuthorFirstName, AuthorId,
};
use kernel::KernelError;

use crate::transfer::{AuthorDto, CreateAuthorDto, GetAuthorDto};

#[async_trait::async_trait]
pub trait GetAuthorService: 'static + Sync + Send + DependOnAuthorQuery {
    async fn get_author(&self, dto: GetAuthorDto) -> error_stack::Result<AuthorDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let id = AuthorId::new(dto.id);
        let author = self
            .author_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable(format!("author {}", dto.id))
            })?;
        Ok(AuthorDto::from(author))
    }

    async fn get_all_authors(&self) -> error_stack::Result<Vec<AuthorDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let authors = self.author_query().find_all(&mut connection).await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }
}

impl<T> GetAuthorService for T where T: DependOnAuthorQuery {}

#[async_trait::async_trait]
pub trait CreateAuthorService: 'static + Sync + Send + DependOnAuthorModifier {
    async fn create_author(
        &self,
        dto: CreateAuthorDto,
    ) -> error_stack::Result<AuthorDto, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let author = Author::new(
            AuthorId::generate(),
            AuthorFirstName::new(dto.first_name),
            AuthorFamilyName::new(dto.family_name),
            dto.date_of_birth.map(AuthorBirthDate::new),
            dto.date_of_death.map(AuthorDeathDate::new),
        );
        self.author_modifier()
            .create(&mut connection, &author)
            .await?;
        connection.commit().await?;

        tracing::debug!(id = %author.id().as_ref(), "created author");
        Ok(AuthorDto::from(author))
    }
}

impl<T> CreateAuthorService for T where T: DependOnAuthorModifier {}
