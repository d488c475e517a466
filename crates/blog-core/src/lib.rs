//! # Blog Core
//!
//! The domain layer of the blog gateway.
//! Admission-control and backup-threshold logic plus the ports that
//! infrastructure implements. No I/O lives here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{BackupError, ConfigurationError, RepoError};
