//! Database connection management.

mod connections;

#[cfg(feature = "postgres")]
mod postgres_store;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_store::{PostgresPostStore, PostgresStore};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
