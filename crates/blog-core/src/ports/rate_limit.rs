//! Rate limiting port.

/// Process-wide admission gate.
///
/// Implementations must be safe to call from many request handlers at once
/// and must never block: a denial is a plain `false`, not an error.
pub trait RateLimiter: Send + Sync {
    /// Take one permit if available. Returns `true` when admitted.
    fn try_admit(&self) -> bool;

    /// Permits currently available, always within `0..=limit()`.
    fn remaining_tokens(&self) -> u64;

    /// Configured permits per second.
    fn limit(&self) -> u64;

    /// When `false`, `try_admit` admits everything and leaves state untouched.
    fn is_enabled(&self) -> bool;
}
