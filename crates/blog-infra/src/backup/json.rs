//! Pretty-printed JSON snapshot writer.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use blog_core::BackupError;

/// Upper bound on `-N` suffixes tried when the requested name is taken.
const MAX_SUFFIX: u32 = 1000;

/// Write `records` as a JSON array next to `destination` and return the path
/// it was committed under.
///
/// Bytes go to a uniquely named staging file in the same directory and are
/// linked into place once synced. An existing file is never replaced: if
/// `destination` is taken the snapshot lands at `<stem>-1.<ext>`,
/// `<stem>-2.<ext>` and so on.
pub async fn write_json_snapshot<T: Serialize>(
    records: &[T],
    destination: &Path,
) -> Result<PathBuf, BackupError> {
    let bytes = serde_json::to_vec_pretty(records)?;
    let destination = destination.to_path_buf();

    tokio::task::spawn_blocking(move || commit(&bytes, &destination))
        .await
        .map_err(|e| BackupError::io(PathBuf::new(), std::io::Error::other(e)))?
}

fn commit(bytes: &[u8], destination: &Path) -> Result<PathBuf, BackupError> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Dropping the staging file on any early return removes it
    let mut staging = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(directory)
        .map_err(|e| BackupError::io(directory, e))?;
    write_synced(&mut staging, bytes).map_err(|e| BackupError::io(staging.path(), e))?;

    for attempt in 0..=MAX_SUFFIX {
        let candidate = numbered(destination, attempt);
        match staging.persist_noclobber(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(file = %candidate.display(), "Backup name taken, trying next");
                staging = e.file;
            }
            Err(e) => return Err(BackupError::io(candidate, e.error)),
        }
    }

    Err(BackupError::io(
        destination,
        std::io::Error::new(ErrorKind::AlreadyExists, "no free backup file name"),
    ))
}

fn write_synced(file: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.as_file().sync_all()
}

/// `a.json` for attempt 0, `a-1.json` for attempt 1.
fn numbered(destination: &Path, attempt: u32) -> PathBuf {
    if attempt == 0 {
        return destination.to_path_buf();
    }

    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match destination.extension() {
        Some(ext) => format!("{}-{}.{}", stem, attempt, ext.to_string_lossy()),
        None => format!("{}-{}", stem, attempt),
    };
    destination.with_file_name(name)
}
