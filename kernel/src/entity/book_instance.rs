mod due_back;
mod id;
mod imprint;
mod status;

pub use self::{due_back::*, id::*, imprint::*, status::*};
use crate::entity::{format_input_date, format_medium_date, BookId};
use destructure::Destructure;
use vodca::References;

/// One physical, loanable copy of a [`Book`](crate::entity::Book).
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookInstance {
    id: BookInstanceId,
    book: BookId,
    imprint: BookInstanceImprint,
    status: BookInstanceStatus,
    due_back: BookInstanceDueBack,
}

impl BookInstance {
    pub fn new(
        id: BookInstanceId,
        book: BookId,
        imprint: BookInstanceImprint,
        status: BookInstanceStatus,
        due_back: BookInstanceDueBack,
    ) -> Self {
        Self {
            id,
            book,
            imprint,
            status,
            due_back,
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id.as_ref())
    }

    pub fn due_back_formatted(&self) -> String {
        format_medium_date(&self.due_back.date())
    }

    pub fn due_back_formatted_input(&self) -> String {
        format_input_date(&self.due_back.date())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::entity::BookId;

    use super::{
        BookInstance, BookInstanceDueBack, BookInstanceId, BookInstanceImprint,
        BookInstanceStatus,
    };

    #[test]
    fn derived_values() {
        let instance = BookInstance::new(
            BookInstanceId::new(Uuid::nil()),
            BookId::new(Uuid::nil()),
            BookInstanceImprint::new("Gollancz, 2011."),
            BookInstanceStatus::default(),
            BookInstanceDueBack::new(datetime!(2026-10-19 23:30 UTC)),
        );
        assert_eq!(
            instance.url(),
            "/catalog/bookinstance/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(instance.due_back_formatted(), "Oct 19, 2026");
        assert_eq!(instance.due_back_formatted_input(), "2026-10-19");
    }

    #[test]
    fn due_back_is_formatted_in_utc() {
        let due_back = BookInstanceDueBack::new(datetime!(2026-10-20 1:00 +3));
        assert_eq!(due_back.date(), time::macros::date!(2026 - 10 - 19));
    }
}
