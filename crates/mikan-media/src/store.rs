use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Where the uploads directory is mounted inside the agent sandbox. Prompt
/// markers reference resources through this path, so it must stay in sync
/// with the sandbox mount, not with the host-side storage root.
const PROMPT_UPLOAD_DIR: &str = "/app/uploads";

/// Maps a stored file name to the path the downstream agent dereferences.
pub fn prompt_path(file_name: &str) -> String {
    format!("{PROMPT_UPLOAD_DIR}/{file_name}")
}

/// Managed storage for message media. Files are written under
/// `<root>/uploads/` with UUID-derived names, so concurrent conversions
/// never collide without any locking at this layer.
#[derive(Debug, Clone)]
pub struct MediaStore {
    uploads: PathBuf,
    http: reqwest::Client,
}

impl MediaStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads: data_dir.into().join("uploads"),
            http: reqwest::Client::new(),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads
    }

    /// Download a remote resource into managed storage.
    ///
    /// `suffix` is an extension hint including the dot (e.g. `".png"`), or
    /// empty when the source carried none. Returns the local path and the
    /// generated file name; the name is never empty.
    pub async fn fetch_remote(&self, url: &str, suffix: &str) -> Result<(PathBuf, String)> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let file_name = generate_name(suffix);
        let path = self.uploads.join(&file_name);
        fs::create_dir_all(&self.uploads).await?;
        fs::write(&path, &bytes).await?;
        debug!(url, file = %path.display(), size = bytes.len(), "fetched remote media");
        Ok((path, file_name))
    }

    /// Relocate a file already on disk into managed storage.
    ///
    /// Renames when source and storage share a filesystem, otherwise copies
    /// and removes the source.
    pub async fn adopt_local(&self, source: &str, suffix: &str) -> Result<(PathBuf, String)> {
        let src = Path::new(source);
        if !fs::try_exists(src).await? {
            return Err(Error::InvalidInput(format!("no such file: {source}")));
        }

        let file_name = generate_name(suffix);
        let path = self.uploads.join(&file_name);
        fs::create_dir_all(&self.uploads).await?;
        if fs::rename(src, &path).await.is_err() {
            fs::copy(src, &path).await?;
            let _ = fs::remove_file(src).await;
        }
        debug!(source, file = %path.display(), "adopted local media");
        Ok((path, file_name))
    }
}

fn generate_name(suffix: &str) -> String {
    format!("{}{suffix}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_path_uses_sandbox_mount() {
        assert_eq!(prompt_path("img1.png"), "/app/uploads/img1.png");
    }

    #[test]
    fn generated_names_are_unique_and_suffixed() {
        let a = generate_name(".png");
        let b = generate_name(".png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
        assert!(!generate_name("").is_empty());
    }

    #[tokio::test]
    async fn adopt_local_moves_into_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let src = dir.path().join("incoming.jpg");
        std::fs::write(&src, b"jpeg bytes").unwrap();

        let (path, file_name) = store.adopt_local(src.to_str().unwrap(), ".jpg").await.unwrap();
        assert!(file_name.ends_with(".jpg"));
        assert!(path.starts_with(store.uploads_dir()));
        assert_eq!(std::fs::read(&path).unwrap(), b"jpeg bytes");
        // Source was relocated, not copied.
        assert!(!src.exists());
    }

    #[tokio::test]
    async fn adopt_local_missing_source_is_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let err = store.adopt_local("/nonexistent/p.png", ".png").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(!err.is_retryable());
    }
}
