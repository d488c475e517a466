use std::path::PathBuf;

/// Threshold rule deciding when a full export is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupPolicy {
    threshold: u64,
}

impl BackupPolicy {
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Inclusive: a count equal to the threshold is due.
    pub fn is_due(&self, record_count: u64) -> bool {
        record_count >= self.threshold
    }

    pub fn records_until_backup(&self, record_count: u64) -> u64 {
        self.threshold.saturating_sub(record_count)
    }

    pub fn status(&self, record_count: u64) -> BackupStatus {
        BackupStatus {
            record_count,
            threshold: self.threshold,
            backup_needed: self.is_due(record_count),
            records_until_backup: self.records_until_backup(record_count),
        }
    }
}

/// Point-in-time view of the backup threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackupStatus {
    pub record_count: u64,
    pub threshold: u64,
    pub backup_needed: bool,
    pub records_until_backup: u64,
}

/// A finished backup file and how many records it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSnapshot {
    pub path: PathBuf,
    pub record_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let policy = BackupPolicy::new(10_000);

        assert!(!policy.is_due(9_999));
        assert!(policy.is_due(10_000));
        assert!(policy.is_due(15_000));
    }

    #[test]
    fn test_records_until_backup_never_negative() {
        let policy = BackupPolicy::new(100);

        assert_eq!(policy.records_until_backup(40), 60);
        assert_eq!(policy.records_until_backup(100), 0);
        assert_eq!(policy.records_until_backup(250), 0);
    }

    #[test]
    fn test_status_snapshot() {
        let status = BackupPolicy::new(10).status(4);

        assert_eq!(
            status,
            BackupStatus {
                record_count: 4,
                threshold: 10,
                backup_needed: false,
                records_until_backup: 6,
            }
        );
    }
}
