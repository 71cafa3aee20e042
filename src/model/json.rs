//! Dotted-path extraction helpers over `serde_json::Value`.
//!
//! The webhook schema is navigated with static dotted paths (`"sender.id"`,
//! `"message.quick_reply.payload"`) so that [`ParseError::MalformedPayload`]
//! can name the exact offending field without string formatting.

use serde_json::Value;

use crate::error::ParseError;

/// Walks `node` along a dotted path. `None` if any segment is absent.
pub(crate) fn value_at<'a>(node: &'a Value, path: &'static str) -> Option<&'a Value> {
    path.split('.').try_fold(node, |value, key| value.get(key))
}

/// Required string field at a dotted path.
pub(crate) fn str_at<'a>(node: &'a Value, path: &'static str) -> Result<&'a str, ParseError> {
    value_at(node, path)
        .and_then(Value::as_str)
        .ok_or(ParseError::MalformedPayload { field: path })
}

/// Required integer field at a dotted path.
pub(crate) fn i64_at(node: &Value, path: &'static str) -> Result<i64, ParseError> {
    value_at(node, path)
        .and_then(Value::as_i64)
        .ok_or(ParseError::MalformedPayload { field: path })
}

/// Optional string field at a dotted path. Wrong-typed values read as absent.
pub(crate) fn opt_str_at(node: &Value, path: &'static str) -> Option<String> {
    value_at(node, path)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_value_at_nested() {
        let node = json!({"sender": {"id": "USER"}});
        assert_eq!(value_at(&node, "sender.id"), Some(&json!("USER")));
        assert_eq!(value_at(&node, "recipient.id"), None);
    }

    #[test]
    fn test_str_at_names_full_path() {
        let node = json!({"sender": {}});
        let err = str_at(&node, "sender.id").unwrap_err();
        assert_eq!(err.field(), Some("sender.id"));
    }

    #[test]
    fn test_str_at_rejects_wrong_type() {
        let node = json!({"sender": {"id": 42}});
        assert!(str_at(&node, "sender.id").is_err());
    }

    #[test]
    fn test_i64_at() {
        let node = json!({"timestamp": 1458692752478_i64});
        assert_eq!(i64_at(&node, "timestamp").unwrap(), 1458692752478);
        assert!(i64_at(&node, "watermark").is_err());
    }

    #[test]
    fn test_opt_str_at_wrong_type_is_absent() {
        let node = json!({"referral": {"ad_id": 7}});
        assert_eq!(opt_str_at(&node, "referral.ad_id"), None);
    }
}
