//! Maps raw export records into the canonical store schema. This stage
//! never fails; absent or malformed fields degrade to defaults.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::cli::ImportOptions;
use crate::model::{ContentType, NormalizedRecord, RawRecord};

static PROFILE_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:x|twitter)\.com/([^/]+)/").expect("valid profile URL regex"));

pub fn normalize(raw: &RawRecord, opts: &ImportOptions) -> NormalizedRecord {
    let content = resolve_content(raw);

    let username = opts
        .username
        .clone()
        .or_else(|| raw.url.as_deref().and_then(username_from_url))
        .unwrap_or_else(|| "unknown".to_string());

    NormalizedRecord {
        username,
        likes: raw.like_count.or(raw.likes).unwrap_or(0),
        replies: raw.reply_count.or(raw.replies).unwrap_or(0),
        retweets: raw.retweet_count.or(raw.retweets).unwrap_or(0),
        views: raw.view_count.or(raw.views).unwrap_or(0),
        bookmarks: raw.bookmark_count.or(raw.bookmarks).unwrap_or(0),
        content_type: classify(raw, &content),
        notes: raw.url.clone(),
        content,
    }
}

fn resolve_content(raw: &RawRecord) -> String {
    raw.text
        .as_deref()
        .filter(|t| !t.is_empty())
        .or_else(|| raw.full_text.as_deref().filter(|t| !t.is_empty()))
        .unwrap_or("")
        .to_string()
}

/// Extract `<username>` from a profile URL of the form `domain/<username>/...`.
fn username_from_url(url: &str) -> Option<String> {
    PROFILE_URL_RE
        .captures(url)
        .map(|caps| caps[1].to_string())
}

/// First match wins: reshare flag, then quote flag, then a leading `@`.
fn classify(raw: &RawRecord, content: &str) -> ContentType {
    if raw.is_retweet {
        ContentType::Reshare
    } else if raw.is_quote {
        ContentType::Quote
    } else if content.starts_with('@') {
        ContentType::Reply
    } else {
        ContentType::Original
    }
}
