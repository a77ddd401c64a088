use std::path::PathBuf;

use async_trait::async_trait;
use mikan_common::{Error, Result};
use mikan_media::MediaStore;

/// Brings message media into managed storage.
///
/// Both operations return `(local_path, file_name)`; an implementation must
/// never produce an empty file name — a fetch that cannot name its result
/// is an error.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    /// Download a remote URL. `suffix` is a dot-prefixed extension hint,
    /// possibly empty.
    async fn fetch_remote(&self, url: &str, suffix: &str) -> Result<(PathBuf, String)>;

    /// Relocate a file already on local disk into managed storage.
    async fn adopt_local(&self, path: &str, suffix: &str) -> Result<(PathBuf, String)>;
}

#[async_trait]
impl MediaFetcher for MediaStore {
    async fn fetch_remote(&self, url: &str, suffix: &str) -> Result<(PathBuf, String)> {
        MediaStore::fetch_remote(self, url, suffix)
            .await
            .map_err(|e| Error::Media(format!("fetch {url} failed: {e}")))
    }

    async fn adopt_local(&self, path: &str, suffix: &str) -> Result<(PathBuf, String)> {
        MediaStore::adopt_local(self, path, suffix)
            .await
            .map_err(|e| Error::Media(format!("adopt {path} failed: {e}")))
    }
}

/// Resolves platform identities to display names and knows who the agent is.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// The agent's own platform id. Compared against mention targets as a
    /// string.
    fn self_id(&self) -> &str;

    /// Display name used whenever the agent itself is mentioned; no lookup
    /// is performed for self.
    fn persona_name(&self) -> &str;

    /// Display name of a group member. Failure propagates — an unresolved
    /// mention would corrupt the prompt.
    async fn group_display_name(&self, group_id: i64, user_id: &str) -> Result<String>;
}
