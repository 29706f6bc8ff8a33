use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use error_stack::{Report, ResultExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use application::service::ReconcileDuplicatesService;
use application::transfer::{ReconcileDto, ReconcileReportDto};
use application::ReconcileError;
use driver::database::PostgresDatabase;
use kernel::interface::database::DatabaseConnection;

fn var<T: FromStr>(key: &str, default: T) -> error_stack::Result<T, ReconcileError> {
    match dotenvy::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            Report::new(ReconcileError::Configuration)
                .attach_printable(format!("`{key}` has an invalid value: {raw}"))
        }),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(default),
        Err(e) => Err(Report::new(e).change_context(ReconcileError::Configuration)),
    }
}

fn config() -> error_stack::Result<ReconcileDto, ReconcileError> {
    Ok(ReconcileDto {
        table: var("DEDUPE_TABLE", "local_library".to_string())?,
        field: var("DEDUPE_FIELD", "email".to_string())?,
        id_column: var("DEDUPE_ID_COLUMN", "id".to_string())?,
        dry_run: var("DEDUPE_DRY_RUN", false)?,
        retries: var("DEDUPE_RETRIES", 2)?,
        deadline: Duration::from_secs(var("DEDUPE_DEADLINE_SECS", 300)?),
    })
}

fn summarize(report: &ReconcileReportDto) {
    let verb = if report.dry_run { "would remove" } else { "removed" };
    println!(
        "{} duplicated value(s), {verb} {} record(s), {} failed, {} skipped",
        report.groups,
        report.removed,
        report.failed.len(),
        report.skipped
    );
    for failed in &report.failed {
        eprintln!(
            "failed value {:?} ({} record(s)): {}",
            failed.value,
            failed.ids.len(),
            failed.error
        );
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Report<ReconcileError>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(tracing_subscriber::EnvFilter::new(
                std::env::var("RUST_LOG")
                    .unwrap_or_else(|_| "remove_duplicates=info,application=info,driver=info".into()),
            )),
        )
        .init();

    let dto = config()?;
    tracing::info!(
        table = %dto.table,
        field = %dto.field,
        dry_run = dto.dry_run,
        "reconciling duplicates"
    );

    let database = PostgresDatabase::new()
        .await
        .change_context(ReconcileError::Connection)?;
    let result = database.reconcile_duplicates(dto).await;
    database.close().await;

    let report = match result {
        Ok(report) => report,
        Err(error) => {
            if let Some(partial) = error.downcast_ref::<ReconcileReportDto>() {
                summarize(partial);
            }
            return Err(error);
        }
    };
    summarize(&report);
    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
