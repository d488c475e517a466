//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod clock;
mod rate_limit;
mod store;

pub use clock::Clock;
pub use rate_limit::RateLimiter;
pub use store::RecordStore;
