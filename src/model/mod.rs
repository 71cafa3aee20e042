//! Data model for Messenger webhook events.
//!
//! All types here are immutable value objects constructed once from a raw
//! JSON node and compared structurally.

pub mod attachment;
pub mod event;
pub(crate) mod json;

pub use attachment::{Attachment, Coordinates, FallbackPayload, MediaPayload};
pub use event::{
    AccountLinkingEvent, AttachmentMessage, DeliveryEvent, Event, EventKind, MessageContent,
    MessageEvent, OptInEvent, PostbackEvent, QuickReplyMessage, ReadEvent, Referral, TextMessage,
};
