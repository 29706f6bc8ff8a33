mod date;
mod id;
mod name;

pub use self::{date::*, id::*, name::*};
use crate::entity::{format_input_date, format_medium_date};
use destructure::Destructure;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Author {
    id: AuthorId,
    first_name: AuthorFirstName,
    family_name: AuthorFamilyName,
    date_of_birth: Option<AuthorBirthDate>,
    date_of_death: Option<AuthorDeathDate>,
}

impl Author {
    pub fn new(
        id: AuthorId,
        first_name: AuthorFirstName,
        family_name: AuthorFamilyName,
        date_of_birth: Option<AuthorBirthDate>,
        date_of_death: Option<AuthorDeathDate>,
    ) -> Self {
        Self {
            id,
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        }
    }

    /// "Family, First", or an empty string when either part is missing.
    pub fn name(&self) -> String {
        let first: &String = self.first_name.as_ref();
        let family: &String = self.family_name.as_ref();
        if first.is_empty() || family.is_empty() {
            return String::new();
        }
        format!("{family}, {first}")
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id.as_ref())
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth
            .as_ref()
            .map(|date| format_medium_date(date.as_ref()))
            .unwrap_or_default()
    }

    pub fn date_of_birth_formatted_input(&self) -> String {
        self.date_of_birth
            .as_ref()
            .map(|date| format_input_date(date.as_ref()))
            .unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death
            .as_ref()
            .map(|date| format_medium_date(date.as_ref()))
            .unwrap_or_default()
    }

    pub fn date_of_death_formatted_input(&self) -> String {
        self.date_of_death
            .as_ref()
            .map(|date| format_input_date(date.as_ref()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;
    use uuid::Uuid;

    use super::{Author, AuthorBirthDate, AuthorFamilyName, AuthorFirstName, AuthorId};

    fn author(first: &str, family: &str) -> Author {
        Author::new(
            AuthorId::new(Uuid::nil()),
            AuthorFirstName::new(first),
            AuthorFamilyName::new(family),
            Some(AuthorBirthDate::new(date!(1920 - 01 - 02))),
            None,
        )
    }

    #[test]
    fn name_is_family_first() {
        assert_eq!(author("Isaac", "Asimov").name(), "Asimov, Isaac");
    }

    #[test]
    fn name_is_empty_when_a_part_is_missing() {
        assert_eq!(author("", "Asimov").name(), "");
        assert_eq!(author("Isaac", "").name(), "");
    }

    #[test]
    fn derived_values() {
        let author = author("Isaac", "Asimov");
        assert_eq!(
            author.url(),
            "/catalog/author/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(author.date_of_birth_formatted(), "Jan 2, 1920");
        assert_eq!(author.date_of_birth_formatted_input(), "1920-01-02");
        assert_eq!(author.date_of_death_formatted(), "");
        assert_eq!(author.date_of_death_formatted_input(), "");
    }
}
