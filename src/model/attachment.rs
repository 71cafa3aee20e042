//! Attachment types carried by attachment messages.
//!
//! An attachment is a single piece of media or location data referenced by a
//! message. The wire format tags each attachment with a `type` discriminator
//! and puts the variant data under `payload`:
//!
//! ```text
//! {"type": "image",    "payload": {"url": "https://…"}}
//! {"type": "location", "payload": {"coordinates": {"lat": 52.37, "long": 9.73}}}
//! ```
//!
//! The platform introduces new attachment kinds over time, so an unknown
//! `type` is never a parse failure: it degrades to [`Attachment::Fallback`].

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::model::json::opt_str_at;

/// A single message attachment.
///
/// Variant selection is driven by the `type` discriminator on the raw node;
/// see [`Attachment::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Attachment {
    /// Image sent to the page.
    Image(MediaPayload),
    /// Audio clip.
    Audio(MediaPayload),
    /// Video clip.
    Video(MediaPayload),
    /// Generic file.
    File(MediaPayload),
    /// Shared location.
    Location(Coordinates),
    /// Unknown or unsupported attachment kind, kept for forward compatibility.
    Fallback(FallbackPayload),
}

/// Payload of a media attachment (image, audio, video, file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaPayload {
    /// CDN URL of the media item.
    pub url: String,
}

/// Geographic coordinates of a location attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub long: f64,
}

// Bitwise comparison so the containing event types can keep derived Eq/Hash.
impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.long.to_bits() == other.long.to_bits()
    }
}

impl Eq for Coordinates {}

impl Hash for Coordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lat.to_bits().hash(state);
        self.long.to_bits().hash(state);
    }
}

/// Payload of a fallback attachment.
///
/// Built from whatever of `title`/`url` the node carries; both may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FallbackPayload {
    /// Human-readable title, if the platform supplied one.
    pub title: Option<String>,
    /// Link target, if the platform supplied one.
    pub url: Option<String>,
}

impl Attachment {
    /// Classifies a raw attachment node and constructs the matching variant.
    ///
    /// A missing or non-string `type` discriminator is a hard failure. For a
    /// known `type` with a missing or malformed payload (no `payload.url` on
    /// media, bad `payload.coordinates` on location), the node degrades to
    /// [`Attachment::Fallback`] instead of failing: optional sub-fields get
    /// resilience, the discriminator does not.
    pub fn from_json(node: &Value) -> Result<Attachment, ParseError> {
        let kind = node
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ParseError::MalformedPayload { field: "type" })?;

        let attachment = match kind {
            "image" | "audio" | "video" | "file" => {
                match opt_str_at(node, "payload.url") {
                    Some(url) => {
                        let payload = MediaPayload { url };
                        match kind {
                            "image" => Attachment::Image(payload),
                            "audio" => Attachment::Audio(payload),
                            "video" => Attachment::Video(payload),
                            _ => Attachment::File(payload),
                        }
                    }
                    None => Attachment::fallback_from(node),
                }
            }
            "location" => node
                .get("payload")
                .and_then(|payload| payload.get("coordinates"))
                .and_then(|coordinates| {
                    serde_json::from_value::<Coordinates>(coordinates.clone()).ok()
                })
                .map(Attachment::Location)
                .unwrap_or_else(|| Attachment::fallback_from(node)),
            _ => Attachment::fallback_from(node),
        };
        Ok(attachment)
    }

    /// Returns the wire discriminator for this attachment.
    pub fn attachment_type(&self) -> &'static str {
        match self {
            Attachment::Image(_) => "image",
            Attachment::Audio(_) => "audio",
            Attachment::Video(_) => "video",
            Attachment::File(_) => "file",
            Attachment::Location(_) => "location",
            Attachment::Fallback(_) => "fallback",
        }
    }

    /// Returns the URL carried by this attachment, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Attachment::Image(media)
            | Attachment::Audio(media)
            | Attachment::Video(media)
            | Attachment::File(media) => Some(&media.url),
            Attachment::Location(_) => None,
            Attachment::Fallback(fallback) => fallback.url.as_deref(),
        }
    }

    /// Builds a fallback from whatever of `title`/`url` the node carries.
    ///
    /// Fallback attachments put `title` and `URL` at the attachment level
    /// (the platform capitalizes `URL` there); other degraded nodes may carry
    /// them inside `payload`.
    fn fallback_from(node: &Value) -> Attachment {
        Attachment::Fallback(FallbackPayload {
            title: opt_str_at(node, "title").or_else(|| opt_str_at(node, "payload.title")),
            url: opt_str_at(node, "url")
                .or_else(|| opt_str_at(node, "URL"))
                .or_else(|| opt_str_at(node, "payload.url")),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_media_attachments() {
        for kind in ["image", "audio", "video", "file"] {
            let node = json!({"type": kind, "payload": {"url": "https://cdn.example/a"}});
            let attachment = Attachment::from_json(&node).unwrap();
            assert_eq!(attachment.attachment_type(), kind);
            assert_eq!(attachment.url(), Some("https://cdn.example/a"));
        }
    }

    #[test]
    fn test_location_attachment() {
        let node = json!({
            "type": "location",
            "payload": {"coordinates": {"lat": 52.3744, "long": 9.7386}}
        });
        let attachment = Attachment::from_json(&node).unwrap();
        assert!(matches!(
            attachment,
            Attachment::Location(Coordinates { lat, long }) if lat == 52.3744 && long == 9.7386
        ));
    }

    #[test]
    fn test_unknown_type_degrades_to_fallback() {
        let node = json!({"type": "sticker", "payload": {}});
        let attachment = Attachment::from_json(&node).unwrap();
        assert!(matches!(attachment, Attachment::Fallback(_)));
    }

    #[test]
    fn test_media_without_url_degrades_to_fallback() {
        let node = json!({"type": "image", "payload": {}});
        let attachment = Attachment::from_json(&node).unwrap();
        assert!(matches!(attachment, Attachment::Fallback(_)));
    }

    #[test]
    fn test_location_without_coordinates_degrades_to_fallback() {
        let node = json!({"type": "location", "payload": {}});
        let attachment = Attachment::from_json(&node).unwrap();
        assert!(matches!(attachment, Attachment::Fallback(_)));
    }

    #[test]
    fn test_fallback_picks_up_title_and_capitalized_url() {
        let node = json!({
            "type": "fallback",
            "title": "Some article",
            "URL": "https://example.com/article",
            "payload": null
        });
        let attachment = Attachment::from_json(&node).unwrap();
        assert_eq!(
            attachment,
            Attachment::Fallback(FallbackPayload {
                title: Some("Some article".to_owned()),
                url: Some("https://example.com/article".to_owned()),
            })
        );
    }

    #[test]
    fn test_missing_type_is_a_hard_failure() {
        let node = json!({"payload": {"url": "https://cdn.example/a"}});
        let err = Attachment::from_json(&node).unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }

    #[test]
    fn test_structural_equality() {
        let node = json!({"type": "location", "payload": {"coordinates": {"lat": 1.0, "long": 2.0}}});
        let a = Attachment::from_json(&node).unwrap();
        let b = Attachment::from_json(&node).unwrap();
        assert_eq!(a, b);
    }
}
