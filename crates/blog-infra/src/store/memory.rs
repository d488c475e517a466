//! In-memory post store - used when no database is configured.

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::BlogPost;
use blog_core::error::RepoError;
use blog_core::ports::RecordStore;

/// In-memory post collection using an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    pub fn with_posts(posts: Vec<BlogPost>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    pub async fn insert(&self, post: BlogPost) {
        self.posts.write().await.push(post);
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for InMemoryPostStore {
    type Record = BlogPost;

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn fetch_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.posts.read().await.clone())
    }
}
