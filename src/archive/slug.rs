use anyhow::{Context, Result};
use chrono::DateTime;

use crate::tumblr::Post;

/// Derive the canonical filename stem for a post:
/// `{YYYY-MM-DD}-{last path segment of the canonical URL}`.
///
/// The date is the post's publish timestamp rendered in UTC, so the slug is
/// stable across machines and timezones. Determinism is what ties a document
/// to its media directory and keeps re-runs idempotent. Two posts published
/// the same day with identical trailing URL segments would collide; the wire
/// format makes that vanishingly rare and it is not guarded against.
///
/// # Errors
///
/// Fails when the canonical URL is empty or ends with a slash (nothing to
/// name the files after), or the timestamp is out of the representable range.
pub fn post_slug(post: &Post) -> Result<String> {
    let date = DateTime::from_timestamp(post.timestamp, 0)
        .with_context(|| format!("post {} has an unrepresentable timestamp", post.id))?
        .format("%Y-%m-%d");

    let stem = post
        .url_with_slug
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .with_context(|| format!("post {} has no usable canonical URL", post.id))?;

    Ok(format!("{date}-{stem}"))
}
