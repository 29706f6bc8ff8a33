use error_stack::Report;
use vodca::AsRefln;

use crate::KernelError;

const MAX_IDENTIFIER_LEN: usize = 63;

/// A table or column name that is safe to splice into SQL once quoted.
#[derive(Debug, Clone, Eq, PartialEq, Hash, AsRefln)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let raw = raw.into();
        let mut chars = raw.chars();
        let valid_head = chars
            .next()
            .is_some_and(|head| head.is_ascii_alphabetic() || head == '_');
        let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_head || !valid_tail || raw.len() > MAX_IDENTIFIER_LEN {
            return Err(Report::new(KernelError::Invalid)
                .attach_printable(format!("`{raw}` is not a valid SQL identifier")));
        }
        Ok(Self(raw))
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::Identifier;

    #[test]
    fn accepts_plain_names() {
        let identifier = Identifier::new("local_library").unwrap();
        assert_eq!(identifier.quoted(), "\"local_library\"");
        assert!(Identifier::new("_email2").is_ok());
    }

    #[test]
    fn rejects_anything_that_needs_escaping() {
        for raw in ["", "2fa", "email; DROP TABLE books", "e\"mail", "e-mail", "ｅmail"] {
            assert!(Identifier::new(raw).is_err(), "{raw} should be rejected");
        }
        assert!(Identifier::new("a".repeat(64)).is_err());
    }
}
