use futures::future;
use mikan_common::{Error, Result, Segment};
use tracing::{debug, warn};

use crate::onebot::wire::{WireMessage, WireSegment};
use crate::traits::{IdentityResolver, MediaFetcher};

/// Convert a wire message into the internal segment list.
///
/// `replied_to_agent` is the platform-level reply signal: when set and the
/// body carries no explicit self-mention, a synthetic `at` segment is
/// prepended so downstream prompt rendering shows the addressing uniformly.
///
/// Returns the segments in original wire order (plus at most one prepended
/// synthetic mention) and whether the message is directed at the agent.
/// Fetch or resolution failure aborts the whole conversion; no partial list
/// is returned.
pub async fn convert_message(
    msg: &WireMessage,
    replied_to_agent: bool,
    fetcher: &dyn MediaFetcher,
    identity: &dyn IdentityResolver,
) -> Result<(Vec<Segment>, bool)> {
    // Segments fetch concurrently, but the output order is the input order:
    // try_join_all yields results positionally, never by completion.
    let decoded = future::try_join_all(
        msg.segments
            .iter()
            .map(|seg| decode_segment(seg, msg.group_id, fetcher, identity)),
    )
    .await?;

    let mut segments: Vec<Segment> = decoded.into_iter().flatten().collect();
    let mut to_me = segments.iter().any(|s| s.is_at(identity.self_id()));

    if replied_to_agent && !to_me {
        segments.insert(0, Segment::at(identity.self_id(), identity.persona_name()));
        to_me = true;
    }

    Ok((segments, to_me))
}

/// Decode one wire segment. `Ok(None)` means the segment is tolerated but
/// dropped (missing image source, unsupported kind); errors abort the
/// containing message.
pub async fn decode_segment(
    seg: &WireSegment,
    group_id: Option<i64>,
    fetcher: &dyn MediaFetcher,
    identity: &dyn IdentityResolver,
) -> Result<Option<Segment>> {
    match seg.kind.as_str() {
        "text" => Ok(Some(Segment::text(
            seg.str_field("text").unwrap_or_default(),
        ))),

        "image" => {
            let suffix = extension_suffix(seg.str_field("file").as_deref());
            if let Some(remote_url) = seg.str_field("url") {
                let (local_path, file_name) =
                    fetcher.fetch_remote(&remote_url, &suffix).await?;
                Ok(Some(Segment::Image {
                    file_name,
                    local_path: local_path.to_string_lossy().into_owned(),
                    remote_url,
                }))
            } else if let Some(file) = seg.str_field("file") {
                let path = strip_file_uri(&file);
                let (local_path, file_name) = fetcher.adopt_local(path, &suffix).await?;
                Ok(Some(Segment::Image {
                    file_name,
                    local_path: local_path.to_string_lossy().into_owned(),
                    remote_url: String::new(),
                }))
            } else {
                warn!(?seg, "image segment without url or file, dropping");
                Ok(None)
            }
        }

        "at" => {
            let Some(group_id) = group_id else {
                return Err(Error::InvalidContext(
                    "at segment outside a group chat".into(),
                ));
            };
            let Some(target_qq) = seg.str_field("qq") else {
                return Err(Error::Channel("at segment without a qq target".into()));
            };
            if target_qq == identity.self_id() {
                // Self-mention: persona name, no lookup.
                Ok(Some(Segment::at(identity.self_id(), identity.persona_name())))
            } else {
                let nickname = identity.group_display_name(group_id, &target_qq).await?;
                Ok(Some(Segment::at(target_qq, nickname)))
            }
        }

        // File events carry no direct link on this protocol yet.
        "file" => {
            warn!(?seg, "file segment not supported for live decode, skipping");
            Ok(None)
        }

        other => {
            debug!(kind = other, "skipping unsupported segment kind");
            Ok(None)
        }
    }
}

/// Lower-cased `.ext` taken from the wire file name, empty when absent.
fn extension_suffix(file: Option<&str>) -> String {
    file.and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// OneBot clients reference local files as `file://<path>` or `file:<path>`.
fn strip_file_uri(file: &str) -> &str {
    file.strip_prefix("file://")
        .or_else(|| file.strip_prefix("file:"))
        .unwrap_or(file)
}
