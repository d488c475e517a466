use std::path::PathBuf;

use blog_core::ConfigurationError;

/// Backup configuration.
#[derive(Debug, Clone)]
pub struct BackupSettings {
    /// Whether the scheduled job runs. Manual triggers ignore this.
    pub enabled: bool,
    /// Record count at or above which a backup is due.
    pub threshold: i64,
    /// Output directory, created on first use.
    pub directory: PathBuf,
    /// Cron expression (with seconds) for the scheduled check.
    pub schedule: String,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 10_000,
            directory: PathBuf::from("./backups"),
            schedule: "0 0 * * * *".to_string(),
        }
    }
}

impl BackupSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("BACKUP_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.enabled),
            threshold: std::env::var("BACKUP_THRESHOLD")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.threshold),
            directory: std::env::var("BACKUP_DIRECTORY")
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            schedule: std::env::var("BACKUP_SCHEDULE_CRON").unwrap_or(defaults.schedule),
        }
    }

    /// Validated threshold.
    pub fn threshold(&self) -> Result<u64, ConfigurationError> {
        u64::try_from(self.threshold)
            .ok()
            .filter(|t| *t > 0)
            .ok_or(ConfigurationError::InvalidThreshold(self.threshold))
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.threshold()?;
        if self.schedule.trim().is_empty() {
            return Err(ConfigurationError::InvalidSchedule(
                "schedule expression is empty".to_string(),
            ));
        }
        Ok(())
    }
}
