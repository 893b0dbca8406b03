//! Content normalization: reduces every post shape to a uniform
//! title / body / media-list triple ready for archival.
//!
//! Normalization is pure. Nothing here touches the network or the
//! filesystem, which is what keeps it unit-testable without fixtures.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::tumblr::{Post, PostKind};

/// Titles longer than this many characters are truncated with an ellipsis.
const TITLE_MAX: usize = 55;

/// Markdown image syntax; the URL capture runs until a quote, closing paren
/// or space so per-image title text is not swallowed.
static IMG_MARKDOWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[[^\]]*\]\(([^") ]+)"#).unwrap());

/// HTML `<img>` tags with a single- or double-quoted `src` attribute.
static IMG_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<img[^>]+src=['"]([^'"]+)"#).unwrap());

/// The uniform form every post is reduced to before archival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    /// Document title; never empty (falls back to the post id).
    pub title: String,
    /// Markdown-flavored document body.
    pub body: String,
    /// Media URLs to mirror alongside the document, in source order,
    /// duplicates preserved.
    pub media: Vec<String>,
}

/// Reduce a post to its normalized form.
#[must_use]
pub fn normalize(post: &Post) -> NormalizedContent {
    let mut content = match &post.kind {
        PostKind::Regular { title, body } => NormalizedContent {
            title: if title.is_empty() { trim_title(body) } else { title.clone() },
            body: body.clone(),
            media: extract_image_urls(body),
        },
        PostKind::Link { text, url, description } => NormalizedContent {
            // Link text is a title already; only surrounding whitespace goes.
            title: text.trim().to_string(),
            body: format!("[{text}]({url})\n\n{description}\n"),
            media: Vec::new(),
        },
        PostKind::Quote { text, source } => NormalizedContent {
            title: trim_title(text),
            body: format!("{text}\n\n---{source}"),
            media: Vec::new(),
        },
        PostKind::Photo { caption, url, photoset } => normalize_photo(caption, url, photoset),
        PostKind::Audio { caption, player } => NormalizedContent {
            title: trim_title(caption),
            body: format!("{caption}\n\nsource: {player}"),
            media: Vec::new(),
        },
        PostKind::Video { caption, source, player } => NormalizedContent {
            title: trim_title(caption),
            body: format!("{caption}\n\nsource: {source}\n\n{player}"),
            media: Vec::new(),
        },
    };

    if content.title.is_empty() {
        content.title = post.id.clone();
    }

    content
}

fn normalize_photo(caption: &str, url: &str, photoset: &[String]) -> NormalizedContent {
    let media: Vec<String> = if photoset.is_empty() {
        vec![url.to_string()]
    } else {
        photoset.to_vec()
    };

    let mut body = format!("{caption}\n\n");
    if media.len() > 1 {
        for media_url in &media {
            body.push_str(media_url);
            body.push('\n');
        }
    } else {
        // A one-item photoset renders exactly like the plain single-photo
        // case: the primary URL, no trailing newline.
        body.push_str(url);
    }

    NormalizedContent {
        title: trim_title(caption),
        body,
        media,
    }
}

/// Strip markup from `s` and cap it at [`TITLE_MAX`] characters for use as a
/// document title. Oversized input is cut at the limit, trailing whitespace
/// removed, and an ellipsis appended.
#[must_use]
pub fn trim_title(s: &str) -> String {
    let text = strip_html(s);
    if text.chars().count() <= TITLE_MAX {
        return text;
    }
    let truncated: String = text.chars().take(TITLE_MAX).collect();
    format!("{}...", truncated.trim_end())
}

/// Reduce an HTML fragment to its text content. Tags go, entities are
/// decoded, the text itself (whitespace included) is preserved.
#[must_use]
pub fn strip_html(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

/// Collect every image URL referenced in `body`: all markdown-syntax matches
/// first, then all HTML `<img>` matches, duplicates kept.
#[must_use]
pub fn extract_image_urls(body: &str) -> Vec<String> {
    let mut urls = Vec::new();
    for caps in IMG_MARKDOWN.captures_iter(body) {
        urls.push(caps[1].to_string());
    }
    for caps in IMG_HTML.captures_iter(body) {
        urls.push(caps[1].to_string());
    }
    urls
}
