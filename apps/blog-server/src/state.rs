//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ConfigurationError;
use blog_core::domain::BlogPost;
use blog_core::ports::{Clock, RateLimiter, RecordStore};
use blog_infra::database::DatabaseConfig;
use blog_infra::{
    BackupService, InMemoryPostStore, RateLimitBackend, RateLimitSettings, SystemClock,
    TokenBucketRateLimiter,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub backup: Arc<BackupService<BlogPost>>,
}

impl AppState {
    pub fn from_parts(
        rate_limiter: Arc<dyn RateLimiter>,
        backup: Arc<BackupService<BlogPost>>,
    ) -> Self {
        Self {
            rate_limiter,
            backup,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());

        let rate_limiter = build_rate_limiter(&config.rate_limit, clock.clone())?;
        let store = build_store(config.database.as_ref()).await;
        let backup = Arc::new(BackupService::new(&config.backup, store, clock)?);

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(rate_limiter, backup))
    }
}

fn build_rate_limiter(
    settings: &RateLimitSettings,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn RateLimiter>, ConfigurationError> {
    match settings.backend {
        #[cfg(feature = "rate-limit")]
        RateLimitBackend::Governor => {
            Ok(Arc::new(blog_infra::GovernorRateLimiter::new(settings)?))
        }
        #[cfg(not(feature = "rate-limit"))]
        RateLimitBackend::Governor => {
            tracing::warn!(
                "Governor backend requested but rate-limit feature is off - using token bucket"
            );
            Ok(Arc::new(TokenBucketRateLimiter::new(settings, clock)?))
        }
        RateLimitBackend::TokenBucket => {
            Ok(Arc::new(TokenBucketRateLimiter::new(settings, clock)?))
        }
    }
}

async fn build_store(
    db_config: Option<&DatabaseConfig>,
) -> Arc<dyn RecordStore<Record = BlogPost>> {
    #[cfg(feature = "postgres")]
    {
        use blog_infra::{DatabaseConnections, PostgresPostStore};

        if let Some(config) = db_config {
            match DatabaseConnections::init(config).await {
                Ok(connections) => return Arc::new(PostgresPostStore::new(connections.main)),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
    }

    #[cfg(not(feature = "postgres"))]
    {
        if db_config.is_some() {
            tracing::warn!("DATABASE_URL ignored - built without postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory store");
    }

    Arc::new(InMemoryPostStore::new())
}
