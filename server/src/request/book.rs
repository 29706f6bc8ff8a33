use serde::{Deserialize, Serialize};

use application::transfer::CreateBookDto;

use crate::controller::TryIntake;
use crate::request::form::{escape, parse_id, trimmed, FieldError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    title: Option<String>,
    author: Option<String>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct BookFormEcho {
    pub title: String,
    pub author: String,
}

#[derive(Debug)]
pub struct RejectedBook {
    pub echo: BookFormEcho,
    pub errors: Vec<FieldError>,
}

pub struct BookTransformer;

impl TryIntake<BookForm> for BookTransformer {
    type To = CreateBookDto;
    type Error = RejectedBook;
    fn emit(&self, input: BookForm) -> Result<Self::To, Self::Error> {
        let mut errors = Vec::new();

        let title = escape(trimmed(&input.title).unwrap_or_default());
        if title.is_empty() {
            errors.push(FieldError::new("title", "Title must be specified", &title));
        }

        let author = escape(trimmed(&input.author).unwrap_or_default());
        let author_id = parse_id(&author);
        if author_id.is_none() {
            errors.push(FieldError::new("author", "Author must be specified", &author));
        }

        match author_id {
            Some(author) if errors.is_empty() => Ok(CreateBookDto { title, author }),
            _ => Err(RejectedBook {
                echo: BookFormEcho { title, author },
                errors,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::{BookForm, BookTransformer};
    use crate::controller::TryIntake;

    #[test]
    fn accepts_valid_book() {
        let author = Uuid::now_v7();
        let dto = TryIntake::emit(
            &BookTransformer,
            BookForm {
                title: Some("The Dispossessed ".into()),
                author: Some(author.to_string()),
            },
        )
        .unwrap();
        assert_eq!(dto.title, "The Dispossessed");
        assert_eq!(dto.author, author);
    }

    #[test]
    fn refuses_missing_fields() {
        let rejected = TryIntake::emit(&BookTransformer, BookForm::default()).unwrap_err();
        assert_eq!(rejected.errors.len(), 2);
        assert_eq!(rejected.echo.title, "");
    }
}
