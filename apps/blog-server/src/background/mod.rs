//! Background work driven off the request path.

mod backup_job;
#[cfg(feature = "scheduler")]
mod scheduler;

pub use backup_job::BackupJob;
#[cfg(feature = "scheduler")]
pub use scheduler::start_backup_schedule;
