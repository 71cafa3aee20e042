//! The webhook event model and its classifier.
//!
//! # Event hierarchy
//!
//! ```text
//! Event { sender_id, recipient_id, timestamp }            ← envelope
//! └── EventKind
//!     ├── Message { mid }                                 ← key = "message"
//!     │   ├── Text { text }
//!     │   ├── QuickReply { text, payload }
//!     │   └── Attachments { attachments: [Attachment] }
//!     ├── Postback { payload, referral? }                 ← key = "postback"
//!     ├── Delivery { mids, watermark }                    ← key = "delivery"
//!     ├── Read { watermark }                              ← key = "read"
//!     ├── OptIn { payload? }                              ← key = "optin"
//!     ├── AccountLinking { status, authorization_code? }  ← key = "account_linking"
//!     └── Referral { source, type, ad_id?, ref? }         ← key = "referral"
//! ```
//!
//! # Classification
//!
//! The webhook schema is a tagged union encoded positionally: the variant is
//! determined by which top-level key is present, not by an explicit
//! discriminator. [`Event::from_json`] therefore runs ordered,
//! mutually-exclusive presence checks, first match wins, with `message`
//! taking precedence over everything else. Within `message`, `quick_reply`
//! wins over `attachments`, which wins over `text`.

use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::model::attachment::Attachment;
use crate::model::json::{i64_at, opt_str_at, str_at, value_at};

/// One classified webhook event.
///
/// Carries the envelope fields common to every messaging node plus the
/// variant-specific payload in [`kind`](Event::kind). Constructed once from a
/// raw node via [`Event::from_json`] and immutable afterwards; equality and
/// hashing are structural over all fields, including nested attachment lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    /// Page-scoped id of the user the event originates from.
    pub sender_id: String,
    /// Id of the receiving page.
    pub recipient_id: String,
    /// Time of the event in epoch milliseconds.
    pub timestamp: i64,
    /// The variant-specific payload.
    pub kind: EventKind,
}

/// The concrete kind of a webhook event.
///
/// Exactly one kind per constructed event; matching is exhaustive, so adding
/// a variant is a compile-time visible change for downstream dispatchers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// A message sent to the page.
    Message(MessageEvent),
    /// A postback button, Get Started button or persistent-menu tap.
    Postback(PostbackEvent),
    /// A delivery receipt acknowledging sent messages.
    Delivery(DeliveryEvent),
    /// A read receipt.
    Read(ReadEvent),
    /// A plugin opt-in.
    OptIn(OptInEvent),
    /// An account-linking status change.
    AccountLinking(AccountLinkingEvent),
    /// A referral (m.me link, ad, or customer chat plugin).
    Referral(Referral),
}

/// Common fields of every message event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MessageEvent {
    /// Message id, assigned by the platform.
    pub mid: String,
    /// The message content.
    pub content: MessageContent,
}

/// Content of a message event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum MessageContent {
    /// Plain text message.
    Text(TextMessage),
    /// Text message sent by tapping a quick-reply button.
    QuickReply(QuickReplyMessage),
    /// Message carrying one or more attachments.
    Attachments(AttachmentMessage),
}

/// A plain text message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextMessage {
    /// The message text, exactly as delivered.
    pub text: String,
}

/// A quick-reply tap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QuickReplyMessage {
    /// The text shown on the tapped button.
    pub text: String,
    /// Developer-defined payload of the tapped button.
    pub payload: String,
}

/// A message carrying attachments.
///
/// `attachments` is never empty: a node whose `attachments` array is absent
/// or empty classifies as a different message content, never as this one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AttachmentMessage {
    /// The attachments, in source array order.
    pub attachments: Vec<Attachment>,
}

/// A postback tap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PostbackEvent {
    /// Developer-defined payload of the tapped button.
    pub payload: String,
    /// Referral info, present when the tap came through a referral surface.
    pub referral: Option<Referral>,
}

/// A delivery receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DeliveryEvent {
    /// Ids of the delivered messages. The platform may omit the array
    /// entirely; that normalizes to empty here.
    pub mids: Vec<String>,
    /// All messages sent before this epoch-millisecond timestamp were
    /// delivered.
    pub watermark: i64,
}

/// A read receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ReadEvent {
    /// All messages sent before this epoch-millisecond timestamp were read.
    pub watermark: i64,
}

/// A plugin opt-in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OptInEvent {
    /// Developer-defined pass-through payload (`optin.ref` on the wire).
    pub payload: Option<String>,
}

/// An account-linking status change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AccountLinkingEvent {
    /// `"linked"` or `"unlinked"`. Kept as a string so new statuses parse.
    pub status: String,
    /// Authorization code, present only on `linked`.
    pub authorization_code: Option<String>,
}

/// Referral info, either standalone or attached to a postback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Referral {
    /// Referral source, e.g. `"SHORTLINK"` or `"ADS"`.
    pub source: String,
    /// Referral type, e.g. `"OPEN_THREAD"`.
    pub referral_type: String,
    /// Ad id, present for ad referrals.
    pub ad_id: Option<String>,
    /// Developer-defined `ref` payload of the referring surface.
    pub ref_payload: Option<String>,
}

impl Event {
    /// Classifies one raw messaging node and constructs the matching event.
    ///
    /// Envelope fields (`sender.id`, `recipient.id`, `timestamp`) are
    /// required on every node regardless of kind. A node with none of the
    /// known top-level keys yields [`ParseError::UnsupportedEventType`]
    /// carrying the raw node. Pure and deterministic: parsing the same node
    /// twice yields two equal, independently owned events.
    pub fn from_json(node: &Value) -> Result<Event, ParseError> {
        Ok(Event {
            sender_id: str_at(node, "sender.id")?.to_owned(),
            recipient_id: str_at(node, "recipient.id")?.to_owned(),
            timestamp: i64_at(node, "timestamp")?,
            kind: EventKind::from_json(node)?,
        })
    }

    /// Returns the message id, for message events.
    pub fn mid(&self) -> Option<&str> {
        self.as_message().map(|message| message.mid.as_str())
    }

    /// Returns the message payload, for message events.
    pub fn as_message(&self) -> Option<&MessageEvent> {
        match &self.kind {
            EventKind::Message(message) => Some(message),
            _ => None,
        }
    }
}

impl EventKind {
    fn from_json(node: &Value) -> Result<EventKind, ParseError> {
        if let Some(message) = node.get("message") {
            return Ok(EventKind::Message(MessageEvent::from_json(node, message)?));
        }
        if node.get("postback").is_some() {
            return Ok(EventKind::Postback(PostbackEvent {
                payload: str_at(node, "postback.payload")?.to_owned(),
                referral: match value_at(node, "postback.referral") {
                    Some(_) => Some(Referral {
                        source: str_at(node, "postback.referral.source")?.to_owned(),
                        referral_type: str_at(node, "postback.referral.type")?.to_owned(),
                        ad_id: opt_str_at(node, "postback.referral.ad_id"),
                        ref_payload: opt_str_at(node, "postback.referral.ref"),
                    }),
                    None => None,
                },
            }));
        }
        if node.get("delivery").is_some() {
            let mids = value_at(node, "delivery.mids")
                .and_then(Value::as_array)
                .map(|mids| {
                    mids.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default();
            return Ok(EventKind::Delivery(DeliveryEvent {
                mids,
                watermark: i64_at(node, "delivery.watermark")?,
            }));
        }
        if node.get("read").is_some() {
            return Ok(EventKind::Read(ReadEvent {
                watermark: i64_at(node, "read.watermark")?,
            }));
        }
        if node.get("optin").is_some() {
            return Ok(EventKind::OptIn(OptInEvent {
                payload: opt_str_at(node, "optin.ref").or_else(|| opt_str_at(node, "optin.payload")),
            }));
        }
        if node.get("account_linking").is_some() {
            return Ok(EventKind::AccountLinking(AccountLinkingEvent {
                status: str_at(node, "account_linking.status")?.to_owned(),
                authorization_code: opt_str_at(node, "account_linking.authorization_code"),
            }));
        }
        if node.get("referral").is_some() {
            return Ok(EventKind::Referral(Referral {
                source: str_at(node, "referral.source")?.to_owned(),
                referral_type: str_at(node, "referral.type")?.to_owned(),
                ad_id: opt_str_at(node, "referral.ad_id"),
                ref_payload: opt_str_at(node, "referral.ref"),
            }));
        }
        Err(ParseError::UnsupportedEventType { node: node.clone() })
    }
}

impl MessageEvent {
    fn from_json(node: &Value, message: &Value) -> Result<MessageEvent, ParseError> {
        let mid = str_at(node, "message.mid")?.to_owned();

        if message.get("quick_reply").is_some() {
            return Ok(MessageEvent {
                mid,
                content: MessageContent::QuickReply(QuickReplyMessage {
                    text: str_at(node, "message.text")?.to_owned(),
                    payload: str_at(node, "message.quick_reply.payload")?.to_owned(),
                }),
            });
        }

        // An absent or empty attachments array is not an attachment message;
        // it falls through to the text check.
        if let Some(attachments) = message
            .get("attachments")
            .and_then(Value::as_array)
            .filter(|attachments| !attachments.is_empty())
        {
            let attachments = attachments
                .iter()
                .map(Attachment::from_json)
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(MessageEvent {
                mid,
                content: MessageContent::Attachments(AttachmentMessage { attachments }),
            });
        }

        if message.get("text").is_some() {
            return Ok(MessageEvent {
                mid,
                content: MessageContent::Text(TextMessage {
                    text: str_at(node, "message.text")?.to_owned(),
                }),
            });
        }

        Err(ParseError::MalformedPayload { field: "message" })
    }
}
