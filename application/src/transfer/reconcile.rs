use std::time::Duration;

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ReconcileDto {
    pub table: String,
    pub field: String,
    pub id_column: String,
    pub dry_run: bool,
    /// Extra attempts for a group whose deletion failed.
    pub retries: u32,
    pub deadline: Duration,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FailedGroupDto {
    pub value: Option<String>,
    pub ids: Vec<Uuid>,
    pub error: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ReconcileReportDto {
    pub dry_run: bool,
    /// Number of values held by more than one record.
    pub groups: usize,
    /// Records deleted, or that would have been deleted on a dry run.
    pub removed: u64,
    pub failed: Vec<FailedGroupDto>,
    /// Groups left untouched because the deadline passed.
    pub skipped: usize,
}

impl ReconcileReportDto {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.skipped == 0
    }
}
