use serde::de::{Deserialize, Deserializer};
use serde::Serialize;
use serde_json::Value;

/// One record as it appears in the upstream JSON export. Every field is
/// optional and several exist under two names (a current and a legacy one);
/// decoding must never reject a record, so counters go through a lenient
/// deserializer that turns malformed values into `None`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub text: Option<String>,
    #[serde(rename = "fullText")]
    pub full_text: Option<String>,
    #[serde(rename = "likeCount", deserialize_with = "de_count")]
    pub like_count: Option<u64>,
    #[serde(deserialize_with = "de_count")]
    pub likes: Option<u64>,
    #[serde(rename = "replyCount", deserialize_with = "de_count")]
    pub reply_count: Option<u64>,
    #[serde(deserialize_with = "de_count")]
    pub replies: Option<u64>,
    #[serde(rename = "retweetCount", deserialize_with = "de_count")]
    pub retweet_count: Option<u64>,
    #[serde(deserialize_with = "de_count")]
    pub retweets: Option<u64>,
    #[serde(rename = "viewCount", deserialize_with = "de_count")]
    pub view_count: Option<u64>,
    #[serde(deserialize_with = "de_count")]
    pub views: Option<u64>,
    #[serde(rename = "bookmarkCount", deserialize_with = "de_count")]
    pub bookmark_count: Option<u64>,
    #[serde(deserialize_with = "de_count")]
    pub bookmarks: Option<u64>,
    pub url: Option<String>,
    #[serde(rename = "isRetweet", deserialize_with = "de_flag")]
    pub is_retweet: bool,
    #[serde(rename = "isQuote", deserialize_with = "de_flag")]
    pub is_quote: bool,
}

/// Canonical record shape accepted by the remote store. Field names here
/// are the wire format of the bulk-insert payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct NormalizedRecord {
    pub username: String,
    pub content: String,
    pub likes: u64,
    pub replies: u64,
    pub retweets: u64,
    pub views: u64,
    pub bookmarks: u64,
    pub content_type: ContentType,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Original,
    Reply,
    Quote,
    Reshare,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Original => "original",
            ContentType::Reply => "reply",
            ContentType::Quote => "quote",
            ContentType::Reshare => "reshare",
        }
    }
}

/// Accepts a counter as a JSON number, a numeric string, or anything else.
/// Non-numeric and negative values decode to `None` so resolution falls
/// through to the legacy field and finally to zero.
fn de_count<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.as_ref().and_then(coerce_count))
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Only an explicit JSON `true` sets a share flag; any other shape is absent.
fn de_flag<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}
