//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Current backup threshold status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupStatusResponse {
    pub record_count: u64,
    pub threshold: u64,
    pub backup_needed: bool,
    pub records_until_backup: u64,
}

/// Result of a manually triggered backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupTriggerResponse {
    pub backup_file: String,
    pub record_count: u64,
    pub status: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}
