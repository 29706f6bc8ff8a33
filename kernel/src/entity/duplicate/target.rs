use vodca::References;

use crate::entity::Identifier;

/// The table whose `field` is supposed to be unique, and how its rows are identified.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct DuplicateTarget {
    table: Identifier,
    field: Identifier,
    id_column: Identifier,
}

impl DuplicateTarget {
    pub fn new(table: Identifier, field: Identifier, id_column: Identifier) -> Self {
        Self {
            table,
            field,
            id_column,
        }
    }
}
