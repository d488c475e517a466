use std::num::NonZeroU32;

use blog_core::ConfigurationError;

/// Which limiter implementation backs the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitBackend {
    /// Lazy-refill token bucket driven by an injectable clock.
    #[default]
    TokenBucket,
    /// GCRA via the governor crate, system clock only.
    Governor,
}

impl RateLimitBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "token-bucket" | "token_bucket" | "bucket" => Some(Self::TokenBucket),
            "governor" | "gcra" => Some(Self::Governor),
            _ => None,
        }
    }
}

/// Gateway rate limit configuration.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    /// Runtime feature flag.
    pub enabled: bool,
    /// Bucket capacity, refilled in full every second.
    pub requests_per_second: i64,
    pub backend: RateLimitBackend,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: 100,
            backend: RateLimitBackend::default(),
        }
    }
}

impl RateLimitSettings {
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            requests_per_second: std::env::var("RATE_LIMIT_REQUESTS_PER_SECOND")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            backend: std::env::var("RATE_LIMIT_BACKEND")
                .ok()
                .and_then(|s| RateLimitBackend::parse(&s))
                .unwrap_or_default(),
        }
    }

    /// Validated bucket capacity.
    pub fn capacity(&self) -> Result<NonZeroU32, ConfigurationError> {
        u32::try_from(self.requests_per_second)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ConfigurationError::InvalidRate(self.requests_per_second))
    }
}
