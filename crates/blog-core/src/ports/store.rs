use async_trait::async_trait;
use serde::Serialize;

use crate::error::RepoError;

/// Read access to the collection being backed up.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Record type, passed through to the serializer untouched.
    type Record: Serialize + Send + Sync;

    /// Total live records.
    async fn count(&self) -> Result<u64, RepoError>;

    /// Every record in the collection.
    async fn fetch_all(&self) -> Result<Vec<Self::Record>, RepoError>;
}
