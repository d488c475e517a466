//! Record stores backing the backup job.

mod memory;

pub use memory::InMemoryPostStore;
