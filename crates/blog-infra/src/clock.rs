//! Clock implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime, TimeDelta};

use blog_core::ports::Clock;

/// System clock: monotonic readings from `Instant`, wall time from the local zone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and simulations.
///
/// Starts at zero elapsed time and only moves when told to. The wall-clock
/// reading is `local_origin` plus the elapsed time.
#[derive(Debug)]
pub struct ManualClock {
    nanos: AtomicU64,
    local_origin: NaiveDateTime,
}

impl ManualClock {
    pub fn new(local_origin: NaiveDateTime) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            local_origin,
        }
    }

    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::SeqCst);
    }

    pub fn set(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(nanos, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(NaiveDateTime::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    fn local_now(&self) -> NaiveDateTime {
        let elapsed = TimeDelta::from_std(self.now()).unwrap_or(TimeDelta::zero());
        self.local_origin + elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_only_when_told() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), Duration::from_millis(500));

        clock.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_manual_clock_wall_time_follows_elapsed() {
        let origin = NaiveDateTime::parse_from_str("2024-05-06 07:08:09", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let clock = ManualClock::new(origin);

        clock.advance(Duration::from_secs(61));

        assert_eq!(
            clock.local_now().format("%Y%m%d_%H%M%S").to_string(),
            "20240506_070910"
        );
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
