use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl Display for BookInstanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                Report::new(KernelError::Invalid)
                    .attach_printable(format!("unknown book instance status: {s}"))
            })
    }
}

#[cfg(test)]
mod test {
    use super::BookInstanceStatus;

    #[test]
    fn parses_every_status() {
        for status in BookInstanceStatus::ALL {
            assert_eq!(status.as_str().parse::<BookInstanceStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("Lost".parse::<BookInstanceStatus>().is_err());
        assert!("available".parse::<BookInstanceStatus>().is_err());
    }

    #[test]
    fn defaults_to_maintenance() {
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
    }
}
