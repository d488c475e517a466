//! # Blog Gateway Server
//!
//! Actix-web entry point: request admission control in front of `/api` and
//! a scheduled backup of blog posts behind it.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use background::BackupJob;
use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    config.backup.validate()?;

    tracing::info!(
        "Starting Blog Gateway Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await?;

    let backup_job = Arc::new(BackupJob::new(state.backup.clone(), config.backup.enabled));

    #[cfg(feature = "scheduler")]
    let mut scheduler =
        background::start_backup_schedule(backup_job, &config.backup.schedule).await?;

    #[cfg(not(feature = "scheduler"))]
    {
        if backup_job.is_enabled() {
            tracing::warn!("Built without scheduler feature - scheduled backups will not run");
        }
    }

    let server_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(server_state.clone()))
            .configure(handlers::configure_routes(
                server_state.rate_limiter.clone(),
            ))
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    #[cfg(feature = "scheduler")]
    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    Ok(())
}
