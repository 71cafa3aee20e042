//! Per-variant event handlers.
//!
//! Callers implement [`EventHandler`] for the variants they care about; every
//! method defaults to a no-op. [`dispatch`] routes a classified [`Event`] to
//! the matching method, exhaustively over [`EventKind`].

use async_trait::async_trait;

use crate::model::{
    AccountLinkingEvent, AttachmentMessage, DeliveryEvent, Event, EventKind, MessageContent,
    OptInEvent, PostbackEvent, QuickReplyMessage, ReadEvent, Referral, TextMessage,
};

/// Receives classified webhook events, one method per variant.
///
/// Each method gets the full event (for the envelope fields) plus the
/// already-narrowed variant payload, so implementations never re-match on
/// [`EventKind`].
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// A plain text message arrived.
    async fn on_text_message(&self, _event: &Event, _message: &TextMessage) {}

    /// A message with attachments arrived.
    async fn on_attachment_message(&self, _event: &Event, _message: &AttachmentMessage) {}

    /// A quick-reply button was tapped.
    async fn on_quick_reply_message(&self, _event: &Event, _message: &QuickReplyMessage) {}

    /// A postback button was tapped.
    async fn on_postback(&self, _event: &Event, _postback: &PostbackEvent) {}

    /// A delivery receipt arrived.
    async fn on_delivery(&self, _event: &Event, _delivery: &DeliveryEvent) {}

    /// A read receipt arrived.
    async fn on_read(&self, _event: &Event, _read: &ReadEvent) {}

    /// A plugin opt-in arrived.
    async fn on_opt_in(&self, _event: &Event, _opt_in: &OptInEvent) {}

    /// An account-linking status change arrived.
    async fn on_account_linking(&self, _event: &Event, _linking: &AccountLinkingEvent) {}

    /// A referral arrived.
    async fn on_referral(&self, _event: &Event, _referral: &Referral) {}
}

/// Routes one classified event to its matching handler method.
pub async fn dispatch(event: &Event, handler: &dyn EventHandler) {
    match &event.kind {
        EventKind::Message(message) => match &message.content {
            MessageContent::Text(text) => {
                handler.on_text_message(event, text).await;
            }
            MessageContent::QuickReply(quick_reply) => {
                handler.on_quick_reply_message(event, quick_reply).await;
            }
            MessageContent::Attachments(attachments) => {
                handler.on_attachment_message(event, attachments).await;
            }
        },
        EventKind::Postback(postback) => handler.on_postback(event, postback).await,
        EventKind::Delivery(delivery) => handler.on_delivery(event, delivery).await,
        EventKind::Read(read) => handler.on_read(event, read).await,
        EventKind::OptIn(opt_in) => handler.on_opt_in(event, opt_in).await,
        EventKind::AccountLinking(linking) => handler.on_account_linking(event, linking).await,
        EventKind::Referral(referral) => handler.on_referral(event, referral).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::webhook::parse_events;

    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingHandler {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn on_text_message(&self, event: &Event, message: &TextMessage) {
            self.record(format!("text:{}:{}", event.sender_id, message.text));
        }

        async fn on_postback(&self, _event: &Event, postback: &PostbackEvent) {
            self.record(format!("postback:{}", postback.payload));
        }

        async fn on_read(&self, _event: &Event, read: &ReadEvent) {
            self.record(format!("read:{}", read.watermark));
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_each_variant_to_its_method() {
        let payload = json!({
            "entry": [{
                "messaging": [
                    {
                        "sender": {"id": "USER_1"},
                        "recipient": {"id": "PAGE_ID"},
                        "timestamp": 1_i64,
                        "message": {"mid": "mid.1", "text": "hi"}
                    },
                    {
                        "sender": {"id": "USER_1"},
                        "recipient": {"id": "PAGE_ID"},
                        "timestamp": 2_i64,
                        "postback": {"payload": "GET_STARTED"}
                    },
                    {
                        "sender": {"id": "USER_1"},
                        "recipient": {"id": "PAGE_ID"},
                        "timestamp": 3_i64,
                        "read": {"watermark": 42_i64}
                    }
                ]
            }]
        });

        let handler = RecordingHandler::default();
        for event in parse_events(&payload) {
            dispatch(&event.unwrap(), &handler).await;
        }

        let calls = handler.calls.lock().unwrap();
        assert_eq!(
            *calls,
            vec!["text:USER_1:hi", "postback:GET_STARTED", "read:42"]
        );
    }

    #[tokio::test]
    async fn test_unimplemented_variants_default_to_noop() {
        let node = json!({
            "sender": {"id": "USER_1"},
            "recipient": {"id": "PAGE_ID"},
            "timestamp": 1_i64,
            "delivery": {"watermark": 7_i64}
        });
        let handler = RecordingHandler::default();
        dispatch(&Event::from_json(&node).unwrap(), &handler).await;
        assert!(handler.calls.lock().unwrap().is_empty());
    }
}
