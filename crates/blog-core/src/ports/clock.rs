//! Time source port.

use std::time::Duration;

use chrono::NaiveDateTime;

/// Clock trait - abstraction over system time so refill math can be simulated.
pub trait Clock: Send + Sync {
    /// Monotonic reading relative to an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Local wall-clock time, used to name backup files.
    fn local_now(&self) -> NaiveDateTime;
}
