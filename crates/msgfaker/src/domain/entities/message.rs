//! SyntheticMessage Entity
//!
//! A message record fabricated on the client, shaped like one delivered by
//! the server so the host's stores and renderer handle it the same way.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::identity::{Identity, UserRecord};

/// Kind tag of every embed built here
pub const RICH_EMBED_KIND: &str = "rich";
/// Accent color of every embed built here (blurple)
pub const EMBED_ACCENT_COLOR: u32 = 0x5865F2;

/// Image attached to an embed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmbedImage {
    pub url: String,
}

/// Rich embed attached to a synthetic message
///
/// Absent fields are left out of the wire shape: the renderer treats a
/// missing title differently from an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichEmbed {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(default = "default_color")]
    pub color: u32,
}

fn default_kind() -> String {
    RICH_EMBED_KIND.to_string()
}

fn default_color() -> u32 {
    EMBED_ACCENT_COLOR
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl RichEmbed {
    /// Build an embed from raw form fields
    ///
    /// Returns `None` when title, description and image url are all empty.
    pub fn from_fields(title: &str, description: &str, image_url: &str) -> Option<Self> {
        Self {
            kind: default_kind(),
            title: non_empty(title),
            description: non_empty(description),
            image: non_empty(image_url).map(|url| EmbedImage { url }),
            color: EMBED_ACCENT_COLOR,
        }
        .normalized()
    }

    /// Drop empty values, pin kind and color, and discard the embed if
    /// nothing is left to render
    pub fn normalized(self) -> Option<Self> {
        let title = self.title.filter(|t| !t.is_empty());
        let description = self.description.filter(|d| !d.is_empty());
        let image = self.image.filter(|i| !i.url.is_empty());

        if title.is_none() && description.is_none() && image.is_none() {
            return None;
        }

        Some(Self {
            kind: default_kind(),
            title,
            description,
            image,
            color: EMBED_ACCENT_COLOR,
        })
    }
}

/// A fabricated message record
#[derive(Debug, Clone, Serialize)]
pub struct SyntheticMessage {
    /// Synthetic id, see [`crate::synthetic_message_id`]
    pub id: String,
    /// Conversation the message belongs to
    pub channel_id: String,
    pub author: Identity,
    pub content: String,
    /// Generation time, serialized as RFC 3339 with microseconds
    #[serde(serialize_with = "serialize_micros")]
    pub timestamp: DateTime<Utc>,
    pub edited_timestamp: Option<DateTime<Utc>>,
    pub tts: bool,
    pub mention_everyone: bool,
    pub mentions: Vec<UserRecord>,
    pub mention_roles: Vec<String>,
    pub attachments: Vec<serde_json::Value>,
    pub embeds: Vec<RichEmbed>,
    pub reactions: Vec<serde_json::Value>,
    pub pinned: bool,
    /// Message type, 0 is a regular message
    #[serde(rename = "type")]
    pub kind: u8,
    pub flags: u64,
    pub referenced_message: Option<serde_json::Value>,
    /// Marks the record as client-fabricated
    #[serde(rename = "_fake")]
    pub synthetic: bool,
}

fn serialize_micros<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Micros, true))
}

impl SyntheticMessage {
    /// Create a synthetic message with every other field at its default
    pub fn new(
        id: impl Into<String>,
        channel_id: impl Into<String>,
        author: Identity,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            timestamp,
            edited_timestamp: None,
            tts: false,
            mention_everyone: false,
            mentions: Vec::new(),
            mention_roles: Vec::new(),
            attachments: Vec::new(),
            embeds: Vec::new(),
            reactions: Vec::new(),
            pinned: false,
            kind: 0,
            flags: 0,
            referenced_message: None,
            synthetic: true,
        }
    }

    /// Attach an embed, if any survives normalization
    pub fn with_embed(mut self, embed: Option<RichEmbed>) -> Self {
        self.embeds = embed.and_then(RichEmbed::normalized).into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_build_no_embed() {
        assert!(RichEmbed::from_fields("", "", "").is_none());
    }

    #[test]
    fn test_title_only_embed_omits_other_fields() {
        let embed = RichEmbed::from_fields("Hi", "", "").unwrap();
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(embed.title.as_deref(), Some("Hi"));
        assert_eq!(
            json,
            serde_json::json!({ "type": "rich", "title": "Hi", "color": 0x5865F2 })
        );
    }

    #[test]
    fn test_image_wire_shape() {
        let embed = RichEmbed::from_fields("", "", "https://example.com/a.png").unwrap();
        let json = serde_json::to_value(&embed).unwrap();

        assert_eq!(json["image"]["url"], "https://example.com/a.png");
        assert!(json.get("title").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_normalized_pins_kind_and_color() {
        let embed = RichEmbed {
            kind: "video".into(),
            title: Some(String::new()),
            description: Some("body".into()),
            image: Some(EmbedImage { url: String::new() }),
            color: 0,
        }
        .normalized()
        .unwrap();

        assert_eq!(embed.kind, "rich");
        assert_eq!(embed.color, EMBED_ACCENT_COLOR);
        assert!(embed.title.is_none());
        assert!(embed.image.is_none());
    }

    #[test]
    fn test_message_wire_defaults() {
        let msg = SyntheticMessage::new(
            "fake-1-abc",
            "C1",
            Identity::placeholder("U9"),
            "hello",
            DateTime::<Utc>::from_timestamp(1_700_000_000, 754_843_443).unwrap(),
        );
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["timestamp"], "2023-11-14T22:13:20.754843Z");
        assert_eq!(json["channel_id"], "C1");
        assert_eq!(json["edited_timestamp"], serde_json::Value::Null);
        assert_eq!(json["referenced_message"], serde_json::Value::Null);
        assert_eq!(json["embeds"], serde_json::json!([]));
        assert_eq!(json["mentions"], serde_json::json!([]));
        assert_eq!(json["pinned"], false);
        assert_eq!(json["type"], 0);
        assert_eq!(json["_fake"], true);
    }
}
