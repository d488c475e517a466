//! Token bucket rate limiter with lazy greedy refill.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use blog_core::ConfigurationError;
use blog_core::ports::{Clock, RateLimiter};

use super::RateLimitSettings;

/// Fixed-point scale: one token is this many units. A bucket of capacity `c`
/// gains `c` units per elapsed nanosecond, so refill stays in integer math.
const UNITS_PER_TOKEN: u64 = 1_000_000_000;

struct Bucket {
    units: u64,
    last_refill: Duration,
}

impl Bucket {
    fn refill(&mut self, now: Duration, capacity: u64) {
        if now <= self.last_refill {
            return;
        }

        let elapsed = u64::try_from((now - self.last_refill).as_nanos()).unwrap_or(u64::MAX);
        self.units = self
            .units
            .saturating_add(elapsed.saturating_mul(capacity))
            .min(capacity * UNITS_PER_TOKEN);
        self.last_refill = now;
    }
}

/// In-process token bucket holding `capacity` permits, refilled continuously
/// at `capacity` permits per second.
///
/// There is no background timer: every call recomputes the refill from the
/// time elapsed since the previous call. The read-modify-write happens under
/// one mutex so concurrent callers can neither share the last token nor lose
/// an update.
pub struct TokenBucketRateLimiter {
    capacity: u64,
    enabled: AtomicBool,
    bucket: Mutex<Bucket>,
    clock: Arc<dyn Clock>,
}

impl TokenBucketRateLimiter {
    /// Build a full bucket. Fails when the configured rate is not positive.
    pub fn new(
        settings: &RateLimitSettings,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigurationError> {
        let capacity = u64::from(settings.capacity()?.get());

        tracing::info!(
            requests_per_second = capacity,
            enabled = settings.enabled,
            "Token bucket rate limiter initialized"
        );

        Ok(Self {
            capacity,
            enabled: AtomicBool::new(settings.enabled),
            bucket: Mutex::new(Bucket {
                units: capacity * UNITS_PER_TOKEN,
                last_refill: clock.now(),
            }),
            clock,
        })
    }

    /// Toggle the runtime flag.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl RateLimiter for TokenBucketRateLimiter {
    fn try_admit(&self) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let admitted = {
            let mut bucket = self.bucket.lock();
            bucket.refill(self.clock.now(), self.capacity);
            if bucket.units >= UNITS_PER_TOKEN {
                bucket.units -= UNITS_PER_TOKEN;
                true
            } else {
                false
            }
        };

        if !admitted {
            tracing::warn!(
                limit = self.capacity,
                "Rate limit exceeded - {} requests/second limit reached",
                self.capacity
            );
        }
        admitted
    }

    fn remaining_tokens(&self) -> u64 {
        let mut bucket = self.bucket.lock();
        bucket.refill(self.clock.now(), self.capacity);
        bucket.units / UNITS_PER_TOKEN
    }

    fn limit(&self) -> u64 {
        self.capacity
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}
