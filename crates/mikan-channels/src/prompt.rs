use mikan_common::Segment;
use mikan_media::prompt_path;

/// Serialize a segment list into a single prompt string.
///
/// Text passes through verbatim; everything else becomes a marker delimited
/// by `one_time_code` so the model can tell payload markers from ordinary
/// text. The grammar is consumed downstream and must stay byte-stable:
///
/// - image: `<{code} | Image:{path}>`
/// - file:  `<{code} | File:{path}>`
/// - at:    `<{code} | At:[@qq:{id};nickname:{name}@]>`
///
/// Precondition: the caller picks `one_time_code` so that it cannot occur
/// inside any text segment (an unpredictable per-render token). Collisions
/// are not detected here and would make the output ambiguous.
pub fn encode_prompt(segments: &[Segment], one_time_code: &str) -> String {
    let mut out = String::new();
    for seg in segments {
        match seg {
            Segment::Text { text } => out.push_str(text),
            Segment::Image { file_name, .. } => {
                out.push_str(&format!(
                    "<{one_time_code} | Image:{}>",
                    prompt_path(file_name)
                ));
            }
            Segment::File { file_name, .. } => {
                out.push_str(&format!(
                    "<{one_time_code} | File:{}>",
                    prompt_path(file_name)
                ));
            }
            Segment::At {
                target_qq,
                target_nickname,
            } => {
                out.push_str(&format!(
                    "<{one_time_code} | At:[@qq:{target_qq};nickname:{target_nickname}@]>"
                ));
            }
        }
    }
    out
}
