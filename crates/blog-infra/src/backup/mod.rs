//! Threshold-triggered export of the post collection to JSON files.

mod config;
pub mod json;
mod service;

pub use config::BackupSettings;
pub use service::BackupService;
