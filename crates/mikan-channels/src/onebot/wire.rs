use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One segment of a OneBot v11 message as received on the wire:
/// a kind tag plus a kind-specific key/value payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSegment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl WireSegment {
    /// Fetch a data field as a string. OneBot implementations are sloppy
    /// about JSON types (`qq` in particular arrives both as a string and as
    /// a number), so numbers are coerced.
    pub fn str_field(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// An ordered wire message plus the group it arrived in, if any.
#[derive(Debug, Clone)]
pub struct WireMessage {
    pub segments: Vec<WireSegment>,
    /// `None` for private chats. Mention resolution is only possible in
    /// group context.
    pub group_id: Option<i64>,
}

impl WireMessage {
    pub fn group(segments: Vec<WireSegment>, group_id: i64) -> Self {
        Self {
            segments,
            group_id: Some(group_id),
        }
    }

    pub fn private(segments: Vec<WireSegment>) -> Self {
        Self {
            segments,
            group_id: None,
        }
    }
}
