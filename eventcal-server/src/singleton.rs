//! Singleton pattern to ensure only one eventcal-server runs per database.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

/// `events.db` is guarded by `events.db.lock` next to it
fn lock_path(db_path: &Path) -> Result<PathBuf> {
    if let Some(dir) = db_path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let mut path = db_path.as_os_str().to_owned();
    path.push(".lock");
    Ok(PathBuf::from(path))
}

/// Acquire an exclusive lock, failing if another instance serves this database
pub fn acquire_lock(db_path: &Path) -> Result<LockGuard> {
    let path = lock_path(db_path)?;
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another eventcal-server instance is already using this database.\n\
            If you believe this is an error, remove: {}",
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
