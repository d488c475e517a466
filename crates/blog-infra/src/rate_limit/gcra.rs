//! In-process rate limiter using the governor crate.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use governor::clock::DefaultClock;
use governor::middleware::StateInformationMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as Governor};

use blog_core::ConfigurationError;
use blog_core::ports::RateLimiter;

use super::RateLimitSettings;

type DirectRateLimiter = Governor<NotKeyed, InMemoryState, DefaultClock, StateInformationMiddleware>;

/// GCRA limiter with a burst of `requests_per_second` cells, one cell
/// replenished every `1 / requests_per_second` seconds.
///
/// Note: governor only reports remaining capacity as a side effect of a
/// check, so `remaining_tokens` is the value observed at the last admission.
pub struct GovernorRateLimiter {
    limiter: DirectRateLimiter,
    capacity: u32,
    enabled: AtomicBool,
    remaining: AtomicU32,
}

impl GovernorRateLimiter {
    pub fn new(settings: &RateLimitSettings) -> Result<Self, ConfigurationError> {
        let capacity = settings.capacity()?;
        let limiter = Governor::direct(Quota::per_second(capacity))
            .with_middleware::<StateInformationMiddleware>();

        tracing::info!(
            requests_per_second = capacity.get(),
            enabled = settings.enabled,
            "Governor rate limiter initialized"
        );

        Ok(Self {
            limiter,
            capacity: capacity.get(),
            enabled: AtomicBool::new(settings.enabled),
            remaining: AtomicU32::new(capacity.get()),
        })
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl RateLimiter for GovernorRateLimiter {
    fn try_admit(&self) -> bool {
        if !self.is_enabled() {
            return true;
        }

        match self.limiter.check() {
            Ok(snapshot) => {
                let remaining = snapshot.remaining_burst_capacity().min(self.capacity);
                self.remaining.store(remaining, Ordering::Relaxed);
                true
            }
            Err(_not_until) => {
                self.remaining.store(0, Ordering::Relaxed);
                tracing::warn!(
                    limit = self.capacity,
                    "Rate limit exceeded - {} requests/second limit reached",
                    self.capacity
                );
                false
            }
        }
    }

    fn remaining_tokens(&self) -> u64 {
        u64::from(self.remaining.load(Ordering::Relaxed))
    }

    fn limit(&self) -> u64 {
        u64::from(self.capacity)
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
