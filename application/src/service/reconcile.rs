use error_stack::{Report, ResultExt};
use tokio::time::Instant;
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnDuplicateQuery, DuplicateQuery};
use kernel::interface::update::{DependOnDuplicateModifier, DuplicateModifier};
use kernel::prelude::entity::{DuplicateGroup, DuplicateTarget, Identifier, RecordId};

use crate::transfer::{FailedGroupDto, ReconcileDto, ReconcileReportDto};
use crate::ReconcileError;

impl ReconcileDto {
    fn target(&self) -> error_stack::Result<DuplicateTarget, ReconcileError> {
        let identifier = |raw: &str| {
            Identifier::new(raw).change_context_lazy(|| ReconcileError::Configuration)
        };
        Ok(DuplicateTarget::new(
            identifier(&self.table)?,
            identifier(&self.field)?,
            identifier(&self.id_column)?,
        ))
    }
}

/// Restores uniqueness of a column that was never constrained at write time.
///
/// Every group of rows sharing a value keeps exactly one row, the one with the
/// smallest identifier. Each group is deleted in its own transaction, so a
/// group that keeps failing after `retries` extra attempts is reported and the
/// remaining groups are still processed. Failing to reach the store, to group
/// the rows, or to finish grouping before the deadline aborts the run. When the
/// store goes away after some groups were reconciled, the partial
/// [`ReconcileReportDto`] is attached to the returned report.
#[async_trait::async_trait]
pub trait ReconcileDuplicatesService:
    'static + Sync + Send + DependOnDuplicateQuery + DependOnDuplicateModifier
{
    async fn reconcile_duplicates(
        &self,
        dto: ReconcileDto,
    ) -> error_stack::Result<ReconcileReportDto, ReconcileError> {
        let target = dto.target()?;
        let deadline = Instant::now() + dto.deadline;

        let groups = tokio::time::timeout_at(deadline, self.find_duplicate_groups(&target))
            .await
            .map_err(|elapsed| Report::new(elapsed).change_context(ReconcileError::Timeout))??;
        let groups = groups
            .into_iter()
            .filter(DuplicateGroup::is_duplicated)
            .collect::<Vec<_>>();

        let mut report = ReconcileReportDto {
            dry_run: dto.dry_run,
            groups: groups.len(),
            ..Default::default()
        };
        tracing::info!(
            table = %target.table().quoted(),
            field = %target.field().quoted(),
            groups = groups.len(),
            dry_run = dto.dry_run,
            "found duplicate groups"
        );

        for (index, group) in groups.iter().enumerate() {
            if Instant::now() >= deadline {
                report.skipped = groups.len() - index;
                tracing::warn!(skipped = report.skipped, "deadline reached, leaving groups untouched");
                break;
            }
            let Some((retained, removed)) = group.partition() else {
                continue;
            };
            if dto.dry_run {
                tracing::info!(value = ?group.value(), %retained, would_remove = removed.len(), "dry run");
                report.removed += removed.len() as u64;
                continue;
            }
            match self.delete_group(&target, &removed, dto.retries).await {
                Ok(deleted) => {
                    tracing::debug!(value = ?group.value(), %retained, deleted, "reconciled group");
                    report.removed += deleted;
                }
                Err(error) if matches!(error.current_context(), ReconcileError::Connection) => {
                    report.failed.push(FailedGroupDto {
                        value: group.value().clone(),
                        ids: removed.iter().copied().map(Uuid::from).collect(),
                        error: format!("{error:?}"),
                    });
                    report.skipped = groups.len() - index - 1;
                    tracing::warn!(
                        groups = report.groups,
                        removed = report.removed,
                        failed = report.failed.len(),
                        skipped = report.skipped,
                        "store became unreachable, aborting reconcile"
                    );
                    let summary = format!(
                        "aborted with {} record(s) already removed, {} group(s) failed, {} skipped",
                        report.removed,
                        report.failed.len(),
                        report.skipped
                    );
                    return Err(error.attach_printable(summary).attach(report));
                }
                Err(error) => {
                    tracing::warn!(value = ?group.value(), "skipping group: {error:?}");
                    report.failed.push(FailedGroupDto {
                        value: group.value().clone(),
                        ids: removed.iter().copied().map(Uuid::from).collect(),
                        error: format!("{error:?}"),
                    });
                }
            }
        }

        tracing::info!(
            groups = report.groups,
            removed = report.removed,
            failed = report.failed.len(),
            skipped = report.skipped,
            dry_run = report.dry_run,
            "reconcile finished"
        );
        Ok(report)
    }

    async fn find_duplicate_groups(
        &self,
        target: &DuplicateTarget,
    ) -> error_stack::Result<Vec<DuplicateGroup>, ReconcileError> {
        let mut connection = self
            .database_connection()
            .transact()
            .await
            .change_context(ReconcileError::Connection)?;
        let groups = self
            .duplicate_query()
            .find_duplicates(&mut connection, target)
            .await
            .change_context(ReconcileError::Query)
            .attach_printable_lazy(|| {
                format!(
                    "grouping {} by {}; check that the table and column exist",
                    target.table().quoted(),
                    target.field().quoted()
                )
            })?;
        connection
            .commit()
            .await
            .change_context(ReconcileError::Query)?;
        Ok(groups)
    }

    async fn delete_group(
        &self,
        target: &DuplicateTarget,
        ids: &[RecordId],
        retries: u32,
    ) -> error_stack::Result<u64, ReconcileError> {
        let mut attempt = 0;
        loop {
            let result = async {
                let mut connection = self
                    .database_connection()
                    .transact()
                    .await
                    .change_context(ReconcileError::Connection)?;
                let deleted = self
                    .duplicate_modifier()
                    .delete_records(&mut connection, target, ids)
                    .await
                    .change_context(ReconcileError::Deletion)?;
                connection
                    .commit()
                    .await
                    .change_context(ReconcileError::Deletion)?;
                Ok::<_, Report<ReconcileError>>(deleted)
            }
            .await;

            match result {
                Ok(deleted) => return Ok(deleted),
                Err(error) if attempt < retries => {
                    attempt += 1;
                    tracing::debug!(attempt, "retrying group deletion: {error:?}");
                }
                Err(error) => {
                    return Err(error
                        .attach_printable(format!("gave up after {} attempt(s)", attempt + 1)))
                }
            }
        }
    }
}

impl<T> ReconcileDuplicatesService for T where T: DependOnDuplicateQuery + DependOnDuplicateModifier {}
