use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub onebot: OneBotConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

/// The agent's own identity on the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// The agent's own QQ id. Mention targets are compared against this as
    /// strings, never numerically.
    #[serde(default)]
    pub self_id: String,
    /// Display name used whenever the agent itself is a mention target.
    #[serde(default = "default_persona_name")]
    pub persona_name: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            self_id: String::new(),
            persona_name: default_persona_name(),
        }
    }
}

fn default_persona_name() -> String {
    "Mikan".to_string()
}

/// OneBot HTTP API endpoint used for identity lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneBotConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for OneBotConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            access_token: None,
        }
    }
}

fn default_api_base() -> String {
    "http://127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Root of the managed storage area. Defaults to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl MediaConfig {
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mikan")
        })
    }
}
