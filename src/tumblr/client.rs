//! Client for the blog's legacy v1 read API (`/api/read/json`).
//!
//! The endpoint pages newest-first via `num`/`start` query parameters and
//! serves its JSON wrapped in a JavaScript assignment
//! (`var tumblr_api_read = {...};`), which has to be stripped before parsing.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::constants::ARCHIVER_USER_AGENT;

use super::post::{Post, PostKind};

/// Client for one blog's post listing endpoint.
#[derive(Debug, Clone)]
pub struct TumblrClient {
    http: reqwest::Client,
    base_url: String,
}

impl TumblrClient {
    /// Create a client for the blog at `base_url` (scheme and host; a trailing
    /// slash is tolerated).
    #[must_use]
    pub fn new(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one page of the post listing, newest-first.
    ///
    /// `filter` is the API's server-side content filter (`"none"` disables it);
    /// `limit` and `offset` map to `num` and `start`. Posts of types outside
    /// the supported set are skipped with a warning but still counted in
    /// [`PostPage::total`]: only an empty wire page means the feed is
    /// exhausted, never a page that merely converted to nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server replies with a
    /// non-success status, or the response body cannot be parsed.
    pub async fn list(&self, filter: &str, limit: usize, offset: usize) -> Result<PostPage> {
        let url = format!(
            "{}/api/read/json?num={limit}&start={offset}&filter={filter}",
            self.base_url
        );

        let response = self
            .http
            .get(&url)
            .header("User-Agent", ARCHIVER_USER_AGENT)
            .send()
            .await
            .context("Failed to fetch post listing")?;

        if !response.status().is_success() {
            anyhow::bail!("post listing failed with status {}", response.status());
        }

        let body = response
            .text()
            .await
            .context("Failed to read post listing body")?;

        let listing: ApiRead = serde_json::from_str(strip_js_wrapper(&body))
            .context("Failed to parse post listing")?;

        let total = listing.posts.len();
        let mut posts = Vec::with_capacity(total);
        for raw in listing.posts {
            let id = raw.id.clone();
            let kind = raw.kind.clone();
            match raw.into_post() {
                Some(post) => posts.push(post),
                None => warn!(id = %id, kind = %kind, "Skipping unsupported post type"),
            }
        }

        Ok(PostPage { posts, total })
    }
}

/// One fetched page of the post listing.
#[derive(Debug)]
pub struct PostPage {
    /// Posts of supported types, in feed order.
    pub posts: Vec<Post>,
    /// Post count of the wire page before unsupported types were dropped.
    /// Zero means the feed itself is exhausted.
    pub total: usize,
}

/// Cut the enclosing `var tumblr_api_read = ...;` assignment down to bare JSON.
fn strip_js_wrapper(body: &str) -> &str {
    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if start < end => &body[start..=end],
        _ => body,
    }
}

/// Top-level shape of the read API response. Pagination metadata is ignored;
/// an exhausted feed just serves an empty (or absent) `posts` array.
#[derive(Debug, Deserialize)]
struct ApiRead {
    #[serde(default)]
    posts: Vec<RawPost>,
}

/// One post exactly as the wire serves it: a flat record where every
/// type-specific field is optional and keys are hyphenated. Converted once
/// into the typed [`Post`] and never seen again past this module.
#[derive(Debug, Clone, Deserialize)]
struct RawPost {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    #[serde(rename = "url-with-slug", default)]
    url_with_slug: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(rename = "unix-timestamp", default)]
    timestamp: i64,
    #[serde(default)]
    date: String,

    #[serde(rename = "regular-title", default)]
    regular_title: String,
    #[serde(rename = "regular-body", default)]
    regular_body: String,

    #[serde(rename = "link-text", default)]
    link_text: String,
    #[serde(rename = "link-url", default)]
    link_url: String,
    #[serde(rename = "link-description", default)]
    link_description: String,

    #[serde(rename = "quote-text", default)]
    quote_text: String,
    #[serde(rename = "quote-source", default)]
    quote_source: String,

    #[serde(rename = "photo-caption", default)]
    photo_caption: String,
    #[serde(rename = "photo-url-1280", default)]
    photo_url: String,
    #[serde(default)]
    photos: Vec<RawPhoto>,

    #[serde(rename = "audio-caption", default)]
    audio_caption: String,
    #[serde(rename = "audio-player", default)]
    audio_player: String,

    #[serde(rename = "video-caption", default)]
    video_caption: String,
    #[serde(rename = "video-source", default)]
    video_source: String,
    #[serde(rename = "video-player", default)]
    video_player: String,
}

/// Photoset member; only the largest size is kept.
#[derive(Debug, Clone, Deserialize)]
struct RawPhoto {
    #[serde(rename = "photo-url-1280", default)]
    photo_url: String,
}

impl RawPost {
    /// Convert the wire record into a typed post, or `None` for types outside
    /// the supported set (the live API also serves e.g. `conversation`).
    fn into_post(self) -> Option<Post> {
        let kind = match self.kind.as_str() {
            "regular" => PostKind::Regular {
                title: self.regular_title,
                body: self.regular_body,
            },
            "link" => PostKind::Link {
                text: self.link_text,
                url: self.link_url,
                description: self.link_description,
            },
            "quote" => PostKind::Quote {
                text: self.quote_text,
                source: self.quote_source,
            },
            "photo" => PostKind::Photo {
                caption: self.photo_caption,
                url: self.photo_url,
                photoset: self.photos.into_iter().map(|p| p.photo_url).collect(),
            },
            "audio" => PostKind::Audio {
                caption: self.audio_caption,
                player: self.audio_player,
            },
            "video" => PostKind::Video {
                caption: self.video_caption,
                source: self.video_source,
                player: self.video_player,
            },
            _ => return None,
        };

        Some(Post {
            id: self.id,
            url_with_slug: self.url_with_slug,
            timestamp: self.timestamp,
            date: self.date,
            kind,
        })
    }
}

/// The wire serves post ids as either a JSON string or a bare number,
/// depending on the blog's vintage.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom("post id must be a string or number")),
    }
}
