use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookInstanceImprint(String);

impl BookInstanceImprint {
    pub fn new(imprint: impl Into<String>) -> Self {
        Self(imprint.into())
    }
}
