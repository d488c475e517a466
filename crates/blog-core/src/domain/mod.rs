//! Domain entities - the core business objects.

mod backup;
mod post;

pub use backup::{BackupPolicy, BackupSnapshot, BackupStatus};
pub use post::BlogPost;
