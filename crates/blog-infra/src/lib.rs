//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! clocks, the gateway rate limiters, post stores and the backup exporter.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external backends, in-memory only
//! - `postgres` - PostgreSQL post store via SeaORM
//! - `rate-limit` - Governor-backed GCRA limiter

pub mod backup;
pub mod clock;
pub mod database;
pub mod rate_limit;
pub mod store;

// Re-exports - In-Memory
pub use backup::{BackupService, BackupSettings};
pub use clock::{ManualClock, SystemClock};
pub use rate_limit::{RateLimitBackend, RateLimitSettings, TokenBucketRateLimiter};
pub use store::InMemoryPostStore;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostStore};

#[cfg(feature = "rate-limit")]
pub use rate_limit::GovernorRateLimiter;
