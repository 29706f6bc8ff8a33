use destructure::Destructure;
use vodca::References;

use crate::entity::RecordId;

/// Rows sharing one value of the target field. `value` is `None` for rows
/// where the field is NULL, which group together.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct DuplicateGroup {
    value: Option<String>,
    ids: Vec<RecordId>,
}

impl DuplicateGroup {
    pub fn new(value: Option<String>, ids: Vec<RecordId>) -> Self {
        Self { value, ids }
    }

    pub fn is_duplicated(&self) -> bool {
        self.ids.len() > 1
    }

    /// Splits the group into the row to keep and the rows to delete.
    /// The smallest identifier is kept, regardless of the order the store
    /// returned the rows in.
    pub fn partition(&self) -> Option<(RecordId, Vec<RecordId>)> {
        let mut ids = self.ids.clone();
        ids.sort_unstable();
        ids.dedup();
        let mut ids = ids.into_iter();
        let retained = ids.next()?;
        Some((retained, ids.collect()))
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::DuplicateGroup;
    use crate::entity::RecordId;

    fn id(n: u128) -> RecordId {
        RecordId::new(Uuid::from_u128(n))
    }

    #[test]
    fn keeps_smallest_identifier() {
        let group = DuplicateGroup::new(Some("a@x.com".into()), vec![id(3), id(1), id(2)]);
        assert!(group.is_duplicated());
        let (retained, removed) = group.partition().unwrap();
        assert_eq!(retained, id(1));
        assert_eq!(removed, vec![id(2), id(3)]);
    }

    #[test]
    fn single_row_group_removes_nothing() {
        let group = DuplicateGroup::new(None, vec![id(7)]);
        assert!(!group.is_duplicated());
        assert_eq!(group.partition(), Some((id(7), vec![])));
    }

    #[test]
    fn empty_group_has_no_partition() {
        assert_eq!(DuplicateGroup::new(None, vec![]).partition(), None);
    }
}
