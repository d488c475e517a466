//! HTTP handlers and route configuration.

mod backup;
mod health;

use std::sync::Arc;

use actix_web::web;
use blog_core::ports::RateLimiter;

use crate::middleware::error::AppError;
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes. Everything under `/api` sits behind the
/// rate limiter.
pub fn configure_routes(
    rate_limiter: Arc<dyn RateLimiter>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api")
                .wrap(RateLimitMiddleware::new(rate_limiter))
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Admin routes
                .service(
                    web::scope("/admin/backup")
                        .route("/status", web::get().to(backup::backup_status))
                        .route("/trigger", web::post().to(backup::trigger_backup)),
                ),
        );
    }
}

/// Fallback for unknown routes.
pub async fn not_found(req: actix_web::HttpRequest) -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::NotFound(format!("No route for {}", req.path())))
}
