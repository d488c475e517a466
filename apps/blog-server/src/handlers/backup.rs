//! Backup administration handlers.

use actix_web::{HttpResponse, web};

use blog_shared::ApiResponse;
use blog_shared::dto::{BackupStatusResponse, BackupTriggerResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/backup/status
pub async fn backup_status(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    tracing::info!("GET /admin/backup/status");

    let status = state.backup.status().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        BackupStatusResponse {
            record_count: status.record_count,
            threshold: status.threshold,
            backup_needed: status.backup_needed,
            records_until_backup: status.records_until_backup,
        },
        "Backup status retrieved",
    )))
}

/// POST /api/admin/backup/trigger
///
/// Runs regardless of the threshold and of the scheduled-backup flag.
pub async fn trigger_backup(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    tracing::info!("POST /admin/backup/trigger - Manual backup requested");

    let snapshot = match state.backup.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Manual backup failed");
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error(format!("Backup failed: {}", e))));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        BackupTriggerResponse {
            backup_file: snapshot.path.display().to_string(),
            record_count: snapshot.record_count,
            status: "SUCCESS".to_string(),
        },
        "Backup completed successfully",
    )))
}
