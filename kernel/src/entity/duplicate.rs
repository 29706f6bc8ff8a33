mod group;
mod identifier;
mod record_id;
mod target;

pub use self::{group::*, identifier::*, record_id::*, target::*};
