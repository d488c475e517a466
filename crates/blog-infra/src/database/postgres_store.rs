use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, EntityTrait, PaginatorTrait};
use serde::Serialize;

use blog_core::domain::BlogPost;
use blog_core::error::RepoError;
use blog_core::ports::RecordStore;

use super::entity::post::Entity as PostEntity;

/// PostgreSQL post store.
pub type PostgresPostStore = PostgresStore<PostEntity, BlogPost>;

/// Generic PostgreSQL record store: reads entity `E` and hands out domain `D`.
pub struct PostgresStore<E, D> {
    pub(crate) db: DbConn,
    _marker: PhantomData<fn() -> (E, D)>,
}

impl<E, D> PostgresStore<E, D> {
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<E, D> RecordStore for PostgresStore<E, D>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    D: From<E::Model> + Serialize + Send + Sync + 'static,
{
    type Record = D;

    async fn count(&self) -> Result<u64, RepoError> {
        E::find()
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))
    }

    async fn fetch_all(&self) -> Result<Vec<D>, RepoError> {
        let models = E::find()
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        tracing::debug!(rows = models.len(), "Loaded all records");
        Ok(models.into_iter().map(Into::into).collect())
    }
}
