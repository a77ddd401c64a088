use serde::{Deserialize, Serialize};

/// One unit of a chat message in its platform-independent form.
///
/// The serialized shape (internal `type` tag, snake_case field names) is the
/// persisted record format: raw message rows in the database store a JSON
/// array of these and must round-trip by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text {
        text: String,
    },
    /// Exactly one of `local_path`/`remote_url` is authoritative in the
    /// source data, but `file_name` is always populated by the decoder.
    Image {
        file_name: String,
        local_path: String,
        remote_url: String,
    },
    /// An @-mention. When `target_qq` equals the agent's own id this is the
    /// canonical directed-at-agent signal.
    At {
        target_qq: String,
        target_nickname: String,
    },
    /// Only produced by record replay; live wire decoding of files is not
    /// implemented yet.
    File {
        file_name: String,
        local_path: String,
    },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn at(target_qq: impl Into<String>, target_nickname: impl Into<String>) -> Self {
        Self::At {
            target_qq: target_qq.into(),
            target_nickname: target_nickname.into(),
        }
    }

    /// True when this is an `at` segment targeting `user_id`.
    pub fn is_at(&self, user_id: &str) -> bool {
        matches!(self, Self::At { target_qq, .. } if target_qq == user_id)
    }
}
