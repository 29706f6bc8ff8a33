use time::Date;
use uuid::Uuid;

use kernel::prelude::entity::{Author, DestructAuthor};

#[derive(Debug, Clone)]
pub struct AuthorDto {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
    pub name: String,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_birth_formatted_input: String,
    pub date_of_death_formatted: String,
    pub date_of_death_formatted_input: String,
}

impl From<Author> for AuthorDto {
    fn from(value: Author) -> Self {
        let name = value.name();
        let url = value.url();
        let date_of_birth_formatted = value.date_of_birth_formatted();
        let date_of_birth_formatted_input = value.date_of_birth_formatted_input();
        let date_of_death_formatted = value.date_of_death_formatted();
        let date_of_death_formatted_input = value.date_of_death_formatted_input();
        let DestructAuthor {
            id,
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        } = value.into_destruct();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            family_name: family_name.into(),
            date_of_birth: date_of_birth.map(Date::from),
            date_of_death: date_of_death.map(Date::from),
            name,
            url,
            date_of_birth_formatted,
            date_of_birth_formatted_input,
            date_of_death_formatted,
            date_of_death_formatted_input,
        }
    }
}

#[derive(Debug)]
pub struct GetAuthorDto {
    pub id: Uuid,
}

#[derive(Debug)]
pub struct CreateAuthorDto {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}
