//! Attachment records as the webmail server sends them.
//!
//! Records arrive as JSON objects tagged with `"@Object": "Object/Attachment"`.
//! The server is loose about scalar types (sizes may be strings, UIDs may be
//! numbers), so every field is decoded leniently and falls back to its
//! default instead of failing the whole record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discriminator tag of a single attachment record.
pub const ATTACHMENT_OBJECT: &str = "Object/Attachment";

/// Discriminator tag of an attachment collection.
pub const ATTACHMENT_COLLECTION: &str = "Collection/AttachmentCollection";

/// One email attachment as described by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentRecord {
    /// Semantic type tag (`"Object/Attachment"` for valid records).
    #[serde(rename = "@Object", deserialize_with = "lenient_string")]
    pub object: String,

    /// MIME content type as sent (not normalized).
    #[serde(rename = "MimeType", deserialize_with = "lenient_string")]
    pub mime_type: String,

    #[serde(rename = "FileName", deserialize_with = "lenient_string")]
    pub file_name: String,

    /// Size estimate in bytes.
    #[serde(rename = "EstimatedSize", deserialize_with = "lenient_u64")]
    pub estimated_size: u64,

    #[serde(rename = "IsInline", deserialize_with = "lenient_bool")]
    pub is_inline: bool,

    #[serde(rename = "IsLinked", deserialize_with = "lenient_bool")]
    pub is_linked: bool,

    /// The server can render a thumbnail for this attachment.
    #[serde(rename = "IsThumbnail", deserialize_with = "lenient_bool")]
    pub is_thumbnail: bool,

    /// Content-ID, usually wrapped in angle brackets.
    #[serde(rename = "CID", deserialize_with = "lenient_string")]
    pub cid: String,

    #[serde(rename = "ContentLocation", deserialize_with = "lenient_string")]
    pub content_location: String,

    /// Opaque token every attachment link is keyed by.
    #[serde(rename = "Download", deserialize_with = "lenient_string")]
    pub download: String,

    #[serde(rename = "Folder", deserialize_with = "lenient_string")]
    pub folder: String,

    #[serde(rename = "Uid", deserialize_with = "lenient_string")]
    pub uid: String,

    /// MIME part index within the message.
    #[serde(rename = "MimeIndex", deserialize_with = "lenient_string")]
    pub mime_index: String,

    /// The server offers a framed (third-party) preview.
    #[serde(rename = "Framed", deserialize_with = "lenient_bool")]
    pub framed: bool,
}

impl AttachmentRecord {
    /// Decode a record, returning `None` unless `value` is an object tagged
    /// `Object/Attachment`.
    pub fn from_value(value: &Value) -> Option<Self> {
        if value.get("@Object").and_then(Value::as_str) != Some(ATTACHMENT_OBJECT) {
            return None;
        }
        match Self::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Undecodable attachment record");
                None
            }
        }
    }
}

/// Flatten a JSON document into candidate attachment records.
///
/// Accepts a single record, an array, or an attachment collection object.
/// Entries are returned as-is; validation happens at view construction.
pub fn parse_attachment_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => {
            if map.get("@Object").and_then(Value::as_str) == Some(ATTACHMENT_COLLECTION) {
                map.get("@Collection")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default()
            } else {
                vec![value.clone()]
            }
        }
        _ => Vec::new(),
    }
}

// ── Lenient scalar decoding ─────────────────────────────────────

/// JavaScript-style truthiness: `true`, non-zero numbers and non-empty strings.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Leading-integer parse: `"123abc"` → 123, negatives and garbage → 0.
fn parse_leading_u64(s: &str) -> u64 {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(truthy(&Value::deserialize(d)?))
}

fn lenient_u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => parse_leading_u64(&s),
        _ => 0,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}
