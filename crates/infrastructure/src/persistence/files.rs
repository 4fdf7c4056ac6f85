//! File helpers shared by the repositories.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Reads a file, returning `None` if it does not exist.
pub(crate) async fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Writes a file through a sibling temp file and a rename.
///
/// Readers never observe a half-written file.
pub(crate) async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let temp = temp_path(path);
    fs::write(&temp, contents).await?;
    fs::rename(&temp, path).await
}

/// Like [`write_atomic`], but fails with `AlreadyExists` instead of
/// replacing an existing file.
///
/// The content is published by hard-linking the finished temp file, so the
/// target either does not exist or is complete.
pub(crate) async fn write_new_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let temp = temp_path(path);
    fs::write(&temp, contents).await?;
    let linked = fs::hard_link(&temp, path).await;
    let removed = fs::remove_file(&temp).await;
    linked?;
    removed
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.json");

        assert!(read_if_exists(&path).await.unwrap().is_none());

        write_atomic(&path, b"{}\n").await.unwrap();
        assert_eq!(
            read_if_exists(&path).await.unwrap().as_deref(),
            Some(&b"{}\n"[..])
        );
        assert!(!temp_path(&path).exists());
    }

    #[tokio::test]
    async fn test_write_new_never_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item.json");

        write_new_atomic(&path, b"first").await.unwrap();
        let error = write_new_atomic(&path, b"second").await.unwrap_err();

        assert_eq!(error.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(
            read_if_exists(&path).await.unwrap().as_deref(),
            Some(&b"first"[..])
        );
        assert!(!temp_path(&path).exists());
    }
}
