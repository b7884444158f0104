//! Filesystem helpers for the build pipeline

use crate::error::{StrokeError, StrokeResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Create `path` and any missing parents
pub async fn ensure_dir(path: &Path) -> StrokeResult<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StrokeError::io(format!("creating directory {}", path.display()), e))
}

/// Remove a directory tree; a missing directory is not an error
pub async fn remove_dir_if_exists(path: &Path) -> StrokeResult<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StrokeError::io(
            format!("removing directory {}", path.display()),
            e,
        )),
    }
}

/// Remove `path` and recreate it empty
pub async fn reset_dir(path: &Path) -> StrokeResult<()> {
    remove_dir_if_exists(path).await?;
    ensure_dir(path).await
}

/// Remove a file; a missing file is not an error.
///
/// Returns whether a file was actually removed.
pub async fn remove_file_if_exists(path: &Path) -> StrokeResult<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StrokeError::io(format!("removing {}", path.display()), e)),
    }
}

/// Copy `src` to `dst`, creating the destination's parent directory
pub async fn copy_file(src: &Path, dst: &Path) -> StrokeResult<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent).await?;
    }
    fs::copy(src, dst).await.map_err(|e| {
        StrokeError::io(
            format!("copying {} to {}", src.display(), dst.display()),
            e,
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn reset_dir_clears_leftovers() {
        let dir = TempDir::new().unwrap();
        let scratch = dir.path().join("tmp-input");
        std::fs::create_dir_all(&scratch).unwrap();
        std::fs::write(scratch.join("stale.svg"), "").unwrap();

        reset_dir(&scratch).await.unwrap();

        assert!(scratch.is_dir());
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn removing_missing_paths_is_ok() {
        let dir = TempDir::new().unwrap();
        assert!(!remove_file_if_exists(&dir.path().join("gone.svg")).await.unwrap());
        remove_dir_if_exists(&dir.path().join("gone")).await.unwrap();
    }

    #[tokio::test]
    async fn remove_file_reports_removal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        assert!(remove_file_if_exists(&path).await.unwrap());
        assert!(!path.exists());
        assert!(!remove_file_if_exists(&path).await.unwrap());
    }

    #[tokio::test]
    async fn copy_creates_parent() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.svg");
        std::fs::write(&src, "<svg/>").unwrap();
        let dst = dir.path().join("nested/deeper/a.svg");

        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read_to_string(dst).unwrap(), "<svg/>");
    }
}
