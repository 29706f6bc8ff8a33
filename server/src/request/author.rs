use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use application::transfer::{CreateAuthorDto, GetAuthorDto};

use crate::controller::{Intake, TryIntake};
use crate::request::form::{escape, parse_date, trimmed, FieldError};

const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AuthorForm {
    first_name: Option<String>,
    family_name: Option<String>,
    date_of_birth: Option<String>,
    date_of_death: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct AuthorFormEcho {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

#[derive(Debug)]
pub struct RejectedAuthor {
    pub echo: AuthorFormEcho,
    pub errors: Vec<FieldError>,
}

#[derive(Debug)]
pub struct GetAuthorRequest {
    id: Uuid,
}

impl GetAuthorRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

fn name(
    input: &Option<String>,
    path: &'static str,
    missing: &'static str,
    too_long: &'static str,
    errors: &mut Vec<FieldError>,
) -> String {
    let raw = trimmed(input).unwrap_or_default();
    let escaped = escape(raw);
    if raw.is_empty() {
        errors.push(FieldError::new(path, missing, &escaped));
    } else if raw.chars().count() > NAME_MAX_CHARS {
        errors.push(FieldError::new(path, too_long, &escaped));
    }
    escaped
}

fn date(
    input: &Option<String>,
    path: &'static str,
    invalid: &'static str,
    errors: &mut Vec<FieldError>,
) -> (String, Option<Date>) {
    let raw = trimmed(input).unwrap_or_default().to_string();
    if raw.is_empty() {
        return (raw, None);
    }
    let parsed = parse_date(&raw);
    if parsed.is_none() {
        errors.push(FieldError::new(path, invalid, &raw));
    }
    (raw, parsed)
}

pub struct AuthorTransformer;

impl Intake<GetAuthorRequest> for AuthorTransformer {
    type To = GetAuthorDto;
    fn emit(&self, input: GetAuthorRequest) -> Self::To {
        GetAuthorDto { id: input.id }
    }
}

impl TryIntake<AuthorForm> for AuthorTransformer {
    type To = CreateAuthorDto;
    type Error = RejectedAuthor;
    fn emit(&self, input: AuthorForm) -> Result<Self::To, Self::Error> {
        let mut errors = Vec::new();
        let first_name = name(
            &input.first_name,
            "first_name",
            "First name must be specified",
            "First name must be at most 100 characters",
            &mut errors,
        );
        let family_name = name(
            &input.family_name,
            "family_name",
            "Family name must be specified",
            "Family name must be at most 100 characters",
            &mut errors,
        );
        let (date_of_birth, birth) = date(
            &input.date_of_birth,
            "date_of_birth",
            "Invalid date of birth",
            &mut errors,
        );
        let (date_of_death, death) = date(
            &input.date_of_death,
            "date_of_death",
            "Invalid date of death",
            &mut errors,
        );

        if !errors.is_empty() {
            return Err(RejectedAuthor {
                echo: AuthorFormEcho {
                    first_name,
                    family_name,
                    date_of_birth,
                    date_of_death,
                },
                errors,
            });
        }

        Ok(CreateAuthorDto {
            first_name,
            family_name,
            date_of_birth: birth,
            date_of_death: death,
        })
    }
}

#[cfg(test)]
mod test {
    use time::macros::date;

    use super::{AuthorForm, AuthorTransformer};
    use crate::controller::TryIntake;

    #[test]
    fn accepts_valid_author() {
        let dto = TryIntake::emit(
            &AuthorTransformer,
            AuthorForm {
                first_name: Some(" Ursula ".into()),
                family_name: Some("Le Guin".into()),
                date_of_birth: Some("1929-10-21".into()),
                date_of_death: Some("".into()),
            },
        )
        .unwrap();
        assert_eq!(dto.first_name, "Ursula");
        assert_eq!(dto.family_name, "Le Guin");
        assert_eq!(dto.date_of_birth, Some(date!(1929 - 10 - 21)));
        assert_eq!(dto.date_of_death, None);
    }

    #[test]
    fn refuses_missing_and_long_names() {
        let rejected = TryIntake::emit(
            &AuthorTransformer,
            AuthorForm {
                first_name: Some("x".repeat(101)),
                date_of_death: Some("1929-21-10".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        let paths = rejected
            .errors
            .iter()
            .map(|error| (error.path(), error.msg()))
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                ("first_name", "First name must be at most 100 characters"),
                ("family_name", "Family name must be specified"),
                ("date_of_death", "Invalid date of death"),
            ]
        );
        assert_eq!(rejected.echo.date_of_death, "1929-21-10");
    }
}
