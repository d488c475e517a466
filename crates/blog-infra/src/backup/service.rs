//! Backup threshold monitor and snapshot export.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use blog_core::domain::{BackupPolicy, BackupSnapshot, BackupStatus};
use blog_core::ports::{Clock, RecordStore};
use blog_core::{BackupError, ConfigurationError};

use super::BackupSettings;
use super::json::write_json_snapshot;

const FILE_PREFIX: &str = "blog_posts_backup_";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Decides when the record count has crossed the threshold and exports a
/// full snapshot on request.
///
/// Holds no state beyond configuration: every call reads the store afresh.
/// Concurrent `perform_backup` calls are not serialized here; runs that land
/// on the same second get `-1`, `-2` suffixed files instead of colliding.
pub struct BackupService<R> {
    store: Arc<dyn RecordStore<Record = R>>,
    clock: Arc<dyn Clock>,
    policy: BackupPolicy,
    directory: PathBuf,
}

impl<R> BackupService<R>
where
    R: Serialize + Send + Sync + 'static,
{
    pub fn new(
        settings: &BackupSettings,
        store: Arc<dyn RecordStore<Record = R>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigurationError> {
        let policy = BackupPolicy::new(settings.threshold()?);

        tracing::info!(
            threshold = policy.threshold(),
            directory = %settings.directory.display(),
            "Backup service initialized"
        );

        Ok(Self {
            store,
            clock,
            policy,
            directory: settings.directory.clone(),
        })
    }

    pub fn threshold(&self) -> u64 {
        self.policy.threshold()
    }

    pub fn directory(&self) -> &std::path::Path {
        &self.directory
    }

    pub async fn record_count(&self) -> Result<u64, BackupError> {
        Ok(self.store.count().await?)
    }

    pub async fn is_backup_needed(&self) -> Result<bool, BackupError> {
        let count = self.record_count().await?;
        let needed = self.policy.is_due(count);
        if needed {
            tracing::warn!(
                count,
                threshold = self.policy.threshold(),
                "Backup threshold reached"
            );
        }
        Ok(needed)
    }

    pub async fn status(&self) -> Result<BackupStatus, BackupError> {
        let count = self.record_count().await?;
        Ok(self.policy.status(count))
    }

    /// Export every record to a new timestamped file and return its absolute path.
    pub async fn perform_backup(&self) -> Result<PathBuf, BackupError> {
        self.snapshot().await.map(|snapshot| snapshot.path)
    }

    /// Like [`perform_backup`](Self::perform_backup), also reporting how many
    /// records went into the file.
    pub async fn snapshot(&self) -> Result<BackupSnapshot, BackupError> {
        tracing::info!("Starting backup process");

        let result = self.export().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to perform backup");
        }
        result
    }

    async fn export(&self) -> Result<BackupSnapshot, BackupError> {
        let existed = tokio::fs::try_exists(&self.directory)
            .await
            .unwrap_or(false);
        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| BackupError::io(&self.directory, e))?;
        if !existed {
            tracing::info!(directory = %self.directory.display(), "Created backup directory");
        }

        let file_name = format!(
            "{}{}.json",
            FILE_PREFIX,
            self.clock.local_now().format(TIMESTAMP_FORMAT)
        );
        let path = self.directory.join(file_name);

        let records = self.store.fetch_all().await?;
        tracing::info!(records = records.len(), "Fetched blog posts for backup");

        let written = write_json_snapshot(&records, &path).await?;

        let absolute = tokio::fs::canonicalize(&written)
            .await
            .map_err(|e| BackupError::io(&written, e))?;
        tracing::info!(
            file = %absolute.display(),
            records = records.len(),
            "Backup completed successfully"
        );

        Ok(BackupSnapshot {
            path: absolute,
            record_count: records.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use blog_core::domain::BlogPost;
    use blog_core::error::RepoError;
    use chrono::NaiveDateTime;

    use crate::clock::ManualClock;
    use crate::store::InMemoryPostStore;

    /// Store whose count is fixed and whose contents are never read.
    struct CountingStore(u64);

    #[async_trait]
    impl RecordStore for CountingStore {
        type Record = BlogPost;

        async fn count(&self) -> Result<u64, RepoError> {
            Ok(self.0)
        }

        async fn fetch_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            Ok(Vec::new())
        }
    }

    struct UnreachableStore;

    #[async_trait]
    impl RecordStore for UnreachableStore {
        type Record = BlogPost;

        async fn count(&self) -> Result<u64, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn fetch_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    fn clock() -> Arc<ManualClock> {
        let origin =
            NaiveDateTime::parse_from_str("2024-03-15 14:30:05", "%Y-%m-%d %H:%M:%S").unwrap();
        Arc::new(ManualClock::new(origin))
    }

    fn settings(directory: PathBuf, threshold: i64) -> BackupSettings {
        BackupSettings {
            threshold,
            directory,
            ..Default::default()
        }
    }

    fn service(
        store: Arc<dyn RecordStore<Record = BlogPost>>,
        directory: PathBuf,
    ) -> BackupService<BlogPost> {
        BackupService::new(&settings(directory, 10_000), store, clock()).unwrap()
    }

    fn post(id: &str, name: &str) -> BlogPost {
        let mut post = BlogPost::new(
            name.to_string(),
            format!("Content of {id}"),
            "Engineering and operations".to_string(),
        )
        .with_author(42, "Ada", "ada@example.com");
        post.post_id = id.to_string();
        post.tag_ids = vec!["rust".to_string()];
        post
    }

    fn read_posts(path: &std::path::Path) -> Vec<BlogPost> {
        serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_threshold_comparison_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();

        let below = service(Arc::new(CountingStore(9_999)), dir.path().to_path_buf());
        assert!(!below.is_backup_needed().await.unwrap());

        let equal = service(Arc::new(CountingStore(10_000)), dir.path().to_path_buf());
        assert!(equal.is_backup_needed().await.unwrap());

        let above = service(Arc::new(CountingStore(15_000)), dir.path().to_path_buf());
        assert!(above.is_backup_needed().await.unwrap());
    }

    #[tokio::test]
    async fn test_record_count_and_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(CountingStore(7_500)), dir.path().to_path_buf());

        assert_eq!(service.record_count().await.unwrap(), 7_500);
        assert_eq!(service.threshold(), 10_000);

        let status = service.status().await.unwrap();
        assert!(!status.backup_needed);
        assert_eq!(status.records_until_backup, 2_500);
    }

    #[tokio::test]
    async fn test_rejects_non_positive_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let store: Arc<dyn RecordStore<Record = BlogPost>> = Arc::new(CountingStore(0));

        let result = BackupService::new(&settings(dir.path().to_path_buf(), -1), store, clock());

        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidThreshold(-1))
        ));
    }

    #[tokio::test]
    async fn test_backup_writes_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![post("p1", "First post"), post("p2", "Second post")];
        let store = Arc::new(InMemoryPostStore::with_posts(posts.clone()));
        let service = service(store, dir.path().to_path_buf());

        let path = service.perform_backup().await.unwrap();

        assert!(path.is_absolute());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "blog_posts_backup_20240315_143005.json"
        );
        assert_eq!(read_posts(&path), posts);
    }

    #[tokio::test]
    async fn test_backup_file_keeps_public_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryPostStore::with_posts(vec![post("p1", "First post")]));
        let service = service(store, dir.path().to_path_buf());

        let path = service.perform_backup().await.unwrap();
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

        let first = &json[0];
        assert_eq!(first["postId"], "p1");
        assert_eq!(first["authorEmail"], "ada@example.com");
        assert_eq!(first["tagIds"][0], "rust");
        assert!(first["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_backup_of_empty_store_is_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(InMemoryPostStore::new()), dir.path().to_path_buf());

        let path = service.perform_backup().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
        assert!(read_posts(&path).is_empty());
    }

    #[tokio::test]
    async fn test_backup_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("backups");
        assert!(!target.exists());

        let store = Arc::new(InMemoryPostStore::with_posts(vec![post("p1", "First post")]));
        let service = service(store, target.clone());

        let path = service.perform_backup().await.unwrap();

        assert!(target.is_dir());
        assert!(path.starts_with(target.canonicalize().unwrap()));
    }

    #[tokio::test]
    async fn test_unwritable_destination_surfaces_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let service = service(
            Arc::new(InMemoryPostStore::with_posts(vec![post("p1", "First post")])),
            blocker.join("backups"),
        );

        let err = service.perform_backup().await.unwrap_err();

        assert!(matches!(err, BackupError::Io { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(Arc::new(UnreachableStore), dir.path().to_path_buf());

        assert!(matches!(
            service.is_backup_needed().await,
            Err(BackupError::Store(RepoError::Connection(_)))
        ));
        assert!(matches!(
            service.perform_backup().await,
            Err(BackupError::Store(_))
        ));

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[tokio::test]
    async fn test_repeated_backups_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let clock = clock();
        let store: Arc<dyn RecordStore<Record = BlogPost>> =
            Arc::new(InMemoryPostStore::with_posts(vec![post("p1", "First post")]));
        let service =
            BackupService::new(&settings(dir.path().to_path_buf(), 1), store, clock.clone())
                .unwrap();

        let first = service.perform_backup().await.unwrap();
        clock.advance(std::time::Duration::from_secs(1));
        let second = service.perform_backup().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[tokio::test]
    async fn test_same_second_backup_keeps_earlier_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(InMemoryPostStore::with_posts(vec![post("p1", "First post")]));
        let service = service(store.clone(), dir.path().to_path_buf());

        let first = service.perform_backup().await.unwrap();
        store.insert(post("p2", "Second post")).await;
        let second = service.perform_backup().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "blog_posts_backup_20240315_143005-1.json"
        );
        assert_eq!(read_posts(&first).len(), 1);
        assert_eq!(read_posts(&second).len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_overlapping_backups_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let posts: Vec<BlogPost> = (0..2_000)
            .map(|i| post(&format!("p{i}"), "Overlapping run"))
            .collect();
        let store = Arc::new(InMemoryPostStore::with_posts(posts));
        let service = Arc::new(service(store, dir.path().to_path_buf()));

        let runs: Vec<_> = (0..4)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.snapshot().await })
            })
            .collect();

        let mut files = Vec::new();
        for run in runs {
            let snapshot = run.await.unwrap().unwrap();
            assert_eq!(snapshot.record_count, 2_000);
            assert_eq!(read_posts(&snapshot.path).len(), 2_000);
            files.push(snapshot.path);
        }

        files.sort();
        files.dedup();
        assert_eq!(files.len(), 4);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);
    }
}
