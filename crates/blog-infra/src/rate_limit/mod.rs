//! Rate limiting implementations.

mod config;
mod token_bucket;

pub use config::{RateLimitBackend, RateLimitSettings};
pub use token_bucket::TokenBucketRateLimiter;

#[cfg(feature = "rate-limit")]
mod gcra;
#[cfg(feature = "rate-limit")]
pub use gcra::GovernorRateLimiter;
