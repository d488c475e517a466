//! Scheduled backup check.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use blog_core::BackupError;
use blog_core::domain::BlogPost;
use blog_infra::BackupService;

/// What a single tick of the backup job did.
#[derive(Debug)]
pub enum BackupOutcome {
    Disabled,
    NotNeeded { record_count: u64, threshold: u64 },
    Completed { file: PathBuf },
    Failed { reason: String },
}

/// Periodic driver for the backup service.
///
/// Errors never escape `check_and_backup`: they are logged and the schedule
/// carries on with the next tick. While the count stays at or above the
/// threshold every tick writes a new file.
pub struct BackupJob {
    service: Arc<BackupService<BlogPost>>,
    enabled: bool,
    running: Mutex<()>,
}

impl BackupJob {
    pub fn new(service: Arc<BackupService<BlogPost>>, enabled: bool) -> Self {
        Self {
            service,
            enabled,
            running: Mutex::new(()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn check_and_backup(&self) -> BackupOutcome {
        if !self.enabled {
            tracing::debug!("Backup is disabled");
            return BackupOutcome::Disabled;
        }

        // Overlapping ticks wait for the previous run instead of racing it
        let _guard = self.running.lock().await;

        tracing::info!("Running scheduled backup check...");

        let threshold = self.service.threshold();
        let record_count = match self.service.record_count().await {
            Ok(count) => count,
            Err(e) => return check_failed(e),
        };
        tracing::info!(record_count, threshold, "Current record count");

        match self.service.is_backup_needed().await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(record_count, threshold, "Backup not needed yet");
                return BackupOutcome::NotNeeded {
                    record_count,
                    threshold,
                };
            }
            Err(e) => return check_failed(e),
        }

        tracing::info!("Backup threshold exceeded. Initiating backup...");
        match self.service.perform_backup().await {
            Ok(file) => {
                tracing::info!(file = %file.display(), "Scheduled backup completed");
                BackupOutcome::Completed { file }
            }
            Err(e) => {
                tracing::error!(error = %e, "Scheduled backup failed");
                BackupOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn check_failed(e: BackupError) -> BackupOutcome {
    tracing::error!(error = %e, "Scheduled backup check failed");
    BackupOutcome::Failed {
        reason: e.to_string(),
    }
}
