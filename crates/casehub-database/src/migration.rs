//! Embedded schema for the sharing tables.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use casehub_core::error::{AppError, ErrorKind};

/// Migrations under `migrations/`, compiled into the binary.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the sharing schema up to the newest embedded version.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    let target = latest_version(&MIGRATOR);
    info!(
        embedded = MIGRATOR.iter().count(),
        target = ?target,
        "Applying sharing schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Sharing schema migration failed: {e}"),
            e,
        )
    })?;

    info!(version = ?target, "Sharing schema is current");
    Ok(())
}

fn latest_version(migrator: &Migrator) -> Option<i64> {
    migrator.iter().map(|m| m.version).max()
}
