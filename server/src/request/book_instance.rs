use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use application::transfer::{
    CreateBookInstanceDto, DeleteBookInstanceDto, GetBookInstanceDto, UpdateBookInstanceDto,
};
use kernel::prelude::entity::BookInstanceStatus;

use crate::controller::{Intake, TryIntake};
use crate::request::form::{escape, parse_datetime, parse_id, trimmed, FieldError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookInstanceForm {
    book: Option<String>,
    imprint: Option<String>,
    status: Option<String>,
    due_back: Option<String>,
}

/// Submitted values, escaped, used to refill a refused form.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct BookInstanceFormEcho {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

#[derive(Debug)]
pub struct RejectedBookInstance {
    pub echo: BookInstanceFormEcho,
    pub errors: Vec<FieldError>,
}

struct ValidBookInstance {
    book: Uuid,
    imprint: String,
    status: BookInstanceStatus,
    due_back: Option<OffsetDateTime>,
}

fn validate(form: BookInstanceForm) -> Result<ValidBookInstance, RejectedBookInstance> {
    let mut errors = Vec::new();

    let book = escape(trimmed(&form.book).unwrap_or_default());
    let book_id = parse_id(&book);
    if book_id.is_none() {
        errors.push(FieldError::new("book", "Book must be specified", &book));
    }

    let imprint = escape(trimmed(&form.imprint).unwrap_or_default());
    if imprint.is_empty() {
        errors.push(FieldError::new("imprint", "Imprint must be specified", &imprint));
    }

    let status = escape(trimmed(&form.status).unwrap_or_default());
    let parsed_status = if status.is_empty() {
        Some(BookInstanceStatus::default())
    } else {
        status.parse::<BookInstanceStatus>().ok()
    };
    if parsed_status.is_none() {
        errors.push(FieldError::new("status", "Invalid status", &status));
    }

    let due_back = trimmed(&form.due_back).unwrap_or_default().to_string();
    let parsed_due_back = match due_back.as_str() {
        "" => Some(None),
        raw => parse_datetime(raw).map(Some),
    };
    if parsed_due_back.is_none() {
        errors.push(FieldError::new("due_back", "Invalid date", &due_back));
    }

    match (book_id, parsed_status, parsed_due_back) {
        (Some(book), Some(status), Some(due_back)) if errors.is_empty() => Ok(ValidBookInstance {
            book,
            imprint,
            status,
            due_back,
        }),
        _ => Err(RejectedBookInstance {
            echo: BookInstanceFormEcho {
                book,
                imprint,
                status,
                due_back,
            },
            errors,
        }),
    }
}

#[derive(Debug)]
pub struct GetBookInstanceRequest {
    id: Uuid,
}

impl GetBookInstanceRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteBookInstanceRequest {
    id: Uuid,
}

impl DeleteBookInstanceRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct BookInstanceTransformer;

impl Intake<GetBookInstanceRequest> for BookInstanceTransformer {
    type To = GetBookInstanceDto;
    fn emit(&self, input: GetBookInstanceRequest) -> Self::To {
        GetBookInstanceDto { id: input.id }
    }
}

impl Intake<DeleteBookInstanceRequest> for BookInstanceTransformer {
    type To = DeleteBookInstanceDto;
    fn emit(&self, input: DeleteBookInstanceRequest) -> Self::To {
        DeleteBookInstanceDto { id: input.id }
    }
}

impl TryIntake<BookInstanceForm> for BookInstanceTransformer {
    type To = CreateBookInstanceDto;
    type Error = RejectedBookInstance;
    fn emit(&self, input: BookInstanceForm) -> Result<Self::To, Self::Error> {
        let valid = validate(input)?;
        Ok(CreateBookInstanceDto {
            book: valid.book,
            imprint: valid.imprint,
            status: valid.status,
            due_back: valid.due_back,
        })
    }
}

impl TryIntake<(Uuid, BookInstanceForm)> for BookInstanceTransformer {
    type To = UpdateBookInstanceDto;
    type Error = RejectedBookInstance;
    fn emit(&self, input: (Uuid, BookInstanceForm)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        let valid = validate(input)?;
        Ok(UpdateBookInstanceDto {
            id,
            book: valid.book,
            imprint: valid.imprint,
            status: valid.status,
            due_back: valid.due_back,
        })
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use kernel::prelude::entity::BookInstanceStatus;

    use super::{BookInstanceForm, BookInstanceTransformer};
    use crate::controller::TryIntake;

    fn form(book: &str, imprint: &str, status: &str, due_back: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: Some(book.into()),
            imprint: Some(imprint.into()),
            status: Some(status.into()),
            due_back: Some(due_back.into()),
        }
    }

    #[test]
    fn accepts_valid_form() {
        let book = Uuid::now_v7();
        let dto = TryIntake::emit(
            &BookInstanceTransformer,
            form(&format!(" {book} "), " Gollancz, 2011 ", "Loaned", "2026-11-02"),
        )
        .unwrap();
        assert_eq!(dto.book, book);
        assert_eq!(dto.imprint, "Gollancz, 2011");
        assert_eq!(dto.status, BookInstanceStatus::Loaned);
        assert_eq!(dto.due_back, Some(datetime!(2026-11-02 0:00 UTC)));
    }

    #[test]
    fn defaults_status_and_due_back() {
        let book = Uuid::now_v7();
        let dto = TryIntake::emit(
            &BookInstanceTransformer,
            BookInstanceForm {
                book: Some(book.to_string()),
                imprint: Some("Tor".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(dto.status, BookInstanceStatus::Maintenance);
        assert_eq!(dto.due_back, None);
    }

    #[test]
    fn collects_every_field_error() {
        let rejected = TryIntake::emit(
            &BookInstanceTransformer,
            form("not-an-id", "  ", "Lost", "tomorrow"),
        )
        .unwrap_err();
        let errors = rejected
            .errors
            .iter()
            .map(|error| (error.path(), error.msg()))
            .collect::<Vec<_>>();
        assert_eq!(
            errors,
            vec![
                ("book", "Book must be specified"),
                ("imprint", "Imprint must be specified"),
                ("status", "Invalid status"),
                ("due_back", "Invalid date"),
            ]
        );
        assert_eq!(rejected.echo.book, "not-an-id");
        assert_eq!(rejected.echo.status, "Lost");
    }

    #[test]
    fn echoes_escaped_values() {
        let rejected = TryIntake::emit(
            &BookInstanceTransformer,
            form("", "<b>Ace</b>", "", ""),
        )
        .unwrap_err();
        assert_eq!(rejected.errors.len(), 1);
        assert_eq!(rejected.echo.imprint, "&lt;b&gt;Ace&lt;&#x2F;b&gt;");
    }

    #[test]
    fn update_keeps_path_id() {
        let id = Uuid::now_v7();
        let book = Uuid::now_v7();
        let dto = TryIntake::emit(
            &BookInstanceTransformer,
            (id, form(&book.to_string(), "Orbit", "Available", "")),
        )
        .unwrap();
        assert_eq!(dto.id, id);
        assert_eq!(dto.book, book);
        assert_eq!(dto.status, BookInstanceStatus::Available);
    }
}
