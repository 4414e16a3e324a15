use crate::error::{SyncError, SyncResult};
use crate::models::ProjectEntry;
use std::path::Path;
use tokio::fs;

/// Overwrites `path` with the pretty-printed entries, creating parent directories as needed.
///
/// The file is replaced by a single write call, not staged through a temp file.
pub async fn write_snapshot(path: &Path, entries: &[ProjectEntry]) -> SyncResult<()> {
    let body = serde_json::to_vec_pretty(entries)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| SyncError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
    }

    fs::write(path, body)
        .await
        .map_err(|source| SyncError::Write {
            path: path.to_path_buf(),
            source,
        })
}

pub async fn read_snapshot(path: &Path) -> SyncResult<Vec<ProjectEntry>> {
    let bytes = fs::read(path).await.map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}
