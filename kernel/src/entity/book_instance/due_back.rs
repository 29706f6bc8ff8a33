use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct BookInstanceDueBack(OffsetDateTime);

impl BookInstanceDueBack {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }

    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    /// Calendar date of the due-back instant, in UTC.
    pub fn date(&self) -> Date {
        self.0.to_offset(UtcOffset::UTC).date()
    }
}
