use serde::{Deserialize, Serialize};
use time::Date;
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct AuthorBirthDate(Date);

impl AuthorBirthDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct AuthorDeathDate(Date);

impl AuthorDeathDate {
    pub fn new(date: impl Into<Date>) -> Self {
        Self(date.into())
    }
}
