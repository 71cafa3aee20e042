//! # messenger-webhook
//!
//! Typed event model and classifier for Messenger Platform webhook payloads.
//!
//! A single webhook delivery carries a batch of loosely-typed JSON events
//! whose kind is encoded by which fields are *present*, not by an explicit
//! discriminator. This crate unwraps the delivery envelope, classifies each
//! messaging node and constructs an immutable, structurally-comparable
//! [`Event`] for it.
//!
//! ## Event hierarchy
//!
//! ```text
//! Event { sender_id, recipient_id, timestamp }
//! └── EventKind
//!     ├── Message { mid, content: Text | QuickReply | Attachments }
//!     ├── Postback { payload, referral? }
//!     ├── Delivery { mids, watermark }
//!     ├── Read { watermark }
//!     ├── OptIn { payload? }
//!     ├── AccountLinking { status, authorization_code? }
//!     └── Referral { source, type, ad_id?, ref? }
//! ```
//!
//! Attachments form their own tagged family (`image`, `audio`, `video`,
//! `file`, `location`) with a [`Attachment::Fallback`] variant for kinds the
//! platform introduces later: an unknown attachment type never fails the
//! parse.
//!
//! ## Usage
//!
//! ```
//! use messenger_webhook::{parse_events, EventKind, MessageContent};
//!
//! let payload = serde_json::json!({
//!     "object": "page",
//!     "entry": [{
//!         "messaging": [{
//!             "sender": {"id": "USER_ID"},
//!             "recipient": {"id": "PAGE_ID"},
//!             "timestamp": 1458692752478_i64,
//!             "message": {"mid": "mid.1457764197618", "text": "hello"}
//!         }]
//!     }]
//! });
//!
//! for event in parse_events(&payload) {
//!     match event {
//!         Ok(event) => match &event.kind {
//!             EventKind::Message(message) => match &message.content {
//!                 MessageContent::Text(text) => println!("{}: {}", event.sender_id, text.text),
//!                 _ => {}
//!             },
//!             _ => {}
//!         },
//!         // Failures are scoped to one node; keep going.
//!         Err(error) => eprintln!("skipping node: {error}"),
//!     }
//! }
//! ```
//!
//! Async callers can implement [`EventHandler`] instead and route events with
//! [`dispatch`].
//!
//! ## What this crate does not do
//!
//! HTTP transport, webhook signature verification and the outbound send API
//! are the caller's concern; this crate is a pure transformation from an
//! already-parsed `serde_json::Value` tree to typed events. It emits
//! `tracing` diagnostics but installs no subscriber.

pub mod error;
pub mod handler;
pub mod model;
pub mod webhook;

pub use error::ParseError;
pub use handler::{EventHandler, dispatch};
pub use model::{
    AccountLinkingEvent, Attachment, AttachmentMessage, Coordinates, DeliveryEvent, Event,
    EventKind, FallbackPayload, MediaPayload, MessageContent, MessageEvent, OptInEvent,
    PostbackEvent, QuickReplyMessage, ReadEvent, Referral, TextMessage,
};
pub use webhook::{iterate_events, parse_events};
