//! Error types for webhook classification.
//!
//! Failures are always scoped to a single messaging node: a batch of N nodes
//! never fails as a whole because one node is bad (see
//! [`parse_events`](crate::webhook::parse_events)).

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while classifying a messaging node.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// A required field is missing or has the wrong JSON type at a location
    /// where the webhook schema guarantees presence.
    ///
    /// `field` is the dotted path of the offending field relative to the
    /// messaging node, e.g. `"sender.id"` or `"message.mid"`.
    #[error("malformed payload: missing or invalid field `{field}`")]
    MalformedPayload {
        /// Dotted path of the missing/invalid field.
        field: &'static str,
    },

    /// The node matches none of the known top-level event shapes.
    ///
    /// Recoverable: the caller may skip it and keep processing the rest of
    /// the batch. Carries the raw node for diagnostics.
    #[error("unsupported event type")]
    UnsupportedEventType {
        /// The raw messaging node that could not be classified.
        node: Value,
    },
}

impl ParseError {
    /// Returns the dotted field path for malformed-payload errors.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ParseError::MalformedPayload { field } => Some(field),
            ParseError::UnsupportedEventType { .. } => None,
        }
    }
}
