// src/services/storage.rs

use std::{
    io,
    path::{Path, PathBuf},
};

use uuid::Uuid;

const FALLBACK_FILENAME: &str = "upload.pdf";

/// Working directory for uploaded documents.
///
/// Each upload gets its own `<root>/<request id>/` directory, so two requests
/// sending the same file name never touch each other's bytes.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

/// An upload written to disk for the lifetime of one request.
#[derive(Debug)]
pub struct StoredUpload {
    dir: PathBuf,
    path: PathBuf,
}

impl UploadStore {
    /// Creates the root directory if it does not exist yet.
    pub async fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(
        &self,
        request_id: Uuid,
        filename: &str,
        data: &[u8],
    ) -> io::Result<StoredUpload> {
        let dir = self.root.join(request_id.to_string());
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(safe_basename(filename));
        tokio::fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Upload stored");

        Ok(StoredUpload { dir, path })
    }
}

impl StoredUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the upload and its request directory.
    pub async fn discard(self) -> io::Result<()> {
        tokio::fs::remove_dir_all(&self.dir).await
    }
}

/// Last path component of a client-supplied name, with either separator style.
fn safe_basename(filename: &str) -> &str {
    match filename.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name,
        _ => FALLBACK_FILENAME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_directories() {
        assert_eq!(safe_basename("notes.pdf"), "notes.pdf");
        assert_eq!(safe_basename("../../etc/passwd.pdf"), "passwd.pdf");
        assert_eq!(safe_basename("C:\\Users\\me\\notes.pdf"), "notes.pdf");
        assert_eq!(safe_basename("dir/"), FALLBACK_FILENAME);
        assert_eq!(safe_basename(".."), FALLBACK_FILENAME);
    }

    #[tokio::test]
    async fn same_filename_is_isolated_per_request() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads")).await.unwrap();

        let first = store.save(Uuid::new_v4(), "doc.pdf", b"first").await.unwrap();
        let second = store.save(Uuid::new_v4(), "doc.pdf", b"second").await.unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(std::fs::read(first.path()).unwrap(), b"first");
        assert_eq!(std::fs::read(second.path()).unwrap(), b"second");
    }

    #[tokio::test]
    async fn discard_removes_request_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path()).await.unwrap();

        let upload = store.save(Uuid::new_v4(), "doc.pdf", b"%PDF").await.unwrap();
        let path = upload.path().to_path_buf();
        upload.discard().await.unwrap();

        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(store.root()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn traversal_names_stay_inside_root() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path()).await.unwrap();

        let upload = store
            .save(Uuid::new_v4(), "../../escape.pdf", b"%PDF")
            .await
            .unwrap();

        assert!(upload.path().starts_with(store.root()));
        assert_eq!(upload.path().file_name().unwrap(), "escape.pdf");
    }
}
