//! Cron scheduler for periodic maintenance tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use casehub_core::config::WorkerConfig;
use casehub_core::error::AppError;

use crate::jobs::InviteSweepJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler })
    }

    /// Register all default scheduled tasks
    pub async fn register_default_tasks(
        &self,
        config: &WorkerConfig,
        sweep: InviteSweepJob,
    ) -> Result<(), AppError> {
        self.register_invite_sweep(&config.invite_sweep_cron, sweep)
            .await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expired invite sweep on `schedule`
    async fn register_invite_sweep(
        &self,
        schedule: &str,
        sweep: InviteSweepJob,
    ) -> Result<(), AppError> {
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let sweep = sweep.clone();
            Box::pin(async move {
                if let Err(e) = sweep.run().await {
                    tracing::error!("Expired invite sweep failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Failed to create invite_sweep schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add invite_sweep schedule: {}", e))
        })?;

        tracing::info!(schedule, "Registered: invite_sweep");
        Ok(())
    }
}
