pub mod onebot;
pub mod prompt;
pub mod record;
pub mod traits;

pub use onebot::convert::{convert_message, decode_segment};
pub use onebot::identity::OneBotIdentity;
pub use onebot::wire::{WireMessage, WireSegment};
pub use prompt::encode_prompt;
pub use record::{decode_record, render_record};
pub use traits::{IdentityResolver, MediaFetcher};
