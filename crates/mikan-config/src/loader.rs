use std::path::{Path, PathBuf};

use mikan_common::{Error, Result};
use tracing::info;

use crate::model::AppConfig;

/// Reads the application config from a TOML file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/mikan/config.toml` (or the platform equivalent).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mikan")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", self.path.display()))
        })?;
        let cfg: AppConfig = toml::from_str(&raw).map_err(|e| {
            Error::Config(format!("failed to parse {}: {e}", self.path.display()))
        })?;
        Ok(cfg)
    }

    /// Missing file falls back to defaults; a present-but-invalid file is
    /// still an error.
    pub fn load_or_default(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            info!("config file {} not found, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[bot]
self_id = "10001"
persona_name = "Mikan"

[onebot]
api_base = "http://127.0.0.1:5700"
access_token = "secret"

[media]
data_dir = "/tmp/mikan-data"
"#
        )
        .unwrap();

        let cfg = ConfigLoader::new(file.path()).load().unwrap();
        assert_eq!(cfg.bot.self_id, "10001");
        assert_eq!(cfg.onebot.api_base, "http://127.0.0.1:5700");
        assert_eq!(cfg.onebot.access_token.as_deref(), Some("secret"));
        assert_eq!(
            cfg.media.data_dir.as_deref(),
            Some(std::path::Path::new("/tmp/mikan-data"))
        );
    }

    #[test]
    fn missing_file_uses_defaults() {
        let loader = ConfigLoader::new("/nonexistent/mikan/config.toml");
        let cfg = loader.load_or_default().unwrap();
        assert_eq!(cfg.bot.persona_name, "Mikan");
        assert!(loader.load().is_err());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[bot\nself_id = ").unwrap();
        let err = ConfigLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
