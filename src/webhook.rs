//! Envelope unwrapping and batch classification.
//!
//! A webhook delivery wraps its events in two layers of arrays:
//!
//! ```text
//! { "object": "page", "entry": [ { "messaging": [ <node>, … ] }, … ] }
//! ```
//!
//! [`iterate_events`] flattens that envelope into a lazy sequence of raw
//! messaging nodes; [`parse_events`] additionally classifies each node,
//! isolating failures per node so one bad node never hides the rest of the
//! batch.

use serde_json::Value;
use tracing::debug;

use crate::error::ParseError;
use crate::model::Event;

/// Flattens a webhook payload into its raw messaging nodes.
///
/// Yields one node per `entry[i].messaging[j]` element, preserving source
/// order across and within entries. Absent or empty `entry`/`messaging`
/// arrays contribute zero nodes rather than an error. Single pass, lazy.
pub fn iterate_events(payload: &Value) -> impl Iterator<Item = &Value> {
    payload
        .get("entry")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .flat_map(|entry| {
            entry
                .get("messaging")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
        })
}

/// Classifies every messaging node in a webhook payload.
///
/// Results come back in the unwrapper's emission order, one per node, with
/// failures scoped to their node. Callers wanting all-or-nothing semantics
/// can collect into `Result<Vec<Event>, ParseError>` instead:
///
/// ```
/// # use serde_json::json;
/// # let payload = json!({"entry": []});
/// let strict: Result<Vec<_>, _> = messenger_webhook::iterate_events(&payload)
///     .map(messenger_webhook::Event::from_json)
///     .collect();
/// ```
pub fn parse_events(payload: &Value) -> Vec<Result<Event, ParseError>> {
    iterate_events(payload)
        .map(|node| {
            Event::from_json(node)
                .inspect_err(|error| debug!(%error, "failed to classify messaging node"))
        })
        .collect()
}
