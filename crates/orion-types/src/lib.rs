pub mod api;
pub mod record;

pub use api::{
    ChatBody, ChatReply, ErrorBody, ImageBody, ImageReply, TranscriptEntry, TranscriptResponse,
};
pub use record::{RecordId, Role};
