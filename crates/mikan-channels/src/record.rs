use mikan_common::{Result, Segment};

use crate::prompt::encode_prompt;

/// Deserialize a persisted raw message record (a JSON array of tagged
/// segments). Malformed JSON or an unknown segment tag is a hard error —
/// a corrupted historical record cannot be rendered safely.
pub fn decode_record(json: &str) -> Result<Vec<Segment>> {
    Ok(serde_json::from_str(json)?)
}

/// Re-render a persisted record as a prompt string. The record already
/// carries resolved file names and display names, so no wire decoding or
/// resource fetching happens here.
pub fn render_record(json: &str, one_time_code: &str) -> Result<String> {
    Ok(encode_prompt(&decode_record(json)?, one_time_code))
}
