use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use url::Url;

use crate::constants::ARCHIVER_USER_AGENT;

/// Outcome of mirroring one post's media list.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaStats {
    pub downloaded: usize,
    /// Fetch-level failures; each is logged, and the post's remaining URLs
    /// still run.
    pub failed: usize,
}

/// Download every non-empty URL in `urls` into `media_dir`. The directory is
/// created whenever `urls` has entries, even blank ones (a photo post can
/// carry an empty photo URL; prior archives keep the empty directory); blank
/// entries are never fetched. Same-named files from an earlier run are
/// overwritten. A failed fetch is warned and counted; a filesystem failure
/// aborts the post's archival.
///
/// # Errors
///
/// Returns an error if the media directory cannot be created or a fetched
/// resource cannot be written to disk.
pub async fn fetch_media(
    http: &reqwest::Client,
    media_dir: &Path,
    urls: &[String],
) -> Result<MediaStats> {
    let mut stats = MediaStats::default();

    if urls.is_empty() {
        return Ok(stats);
    }

    if !media_dir.exists() {
        tokio::fs::create_dir(media_dir)
            .await
            .with_context(|| format!("Failed to create media directory: {}", media_dir.display()))?;
    }

    for url in urls.iter().filter(|url| !url.is_empty()) {
        let (filename, payload) = match download(http, url).await {
            Ok(result) => result,
            Err(e) => {
                warn!(url = %url, "Failed to download media: {e:#}");
                stats.failed += 1;
                continue;
            }
        };

        let path = media_dir.join(&filename);
        tokio::fs::write(&path, &payload)
            .await
            .with_context(|| format!("Failed to write media file: {}", path.display()))?;

        debug!(url = %url, file = %filename, "Downloaded media");
        stats.downloaded += 1;
    }

    Ok(stats)
}

/// Fetch one media resource, returning the local filename to store it under
/// and the payload bytes.
async fn download(http: &reqwest::Client, url: &str) -> Result<(String, Vec<u8>)> {
    let response = http
        .get(url)
        .header("User-Agent", ARCHIVER_USER_AGENT)
        .send()
        .await
        .context("Failed to fetch media URL")?;

    if !response.status().is_success() {
        anyhow::bail!("media fetch failed with status {}", response.status());
    }

    // Media URLs often redirect; the final URL knows the real basename. Fall
    // back to the trailing segment of the URL we were given.
    let filename = basename(response.url())
        .or_else(|| trailing_segment(url))
        .context("media URL has no usable filename")?;

    let payload = response
        .bytes()
        .await
        .context("Failed to read media body")?;

    Ok((filename, payload.to_vec()))
}

/// Last non-empty path segment of a parsed URL, query and fragment excluded.
fn basename(url: &Url) -> Option<String> {
    url.path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
}

/// Trailing path segment of a raw URL string, for URLs that do not parse
/// cleanly. Anything with a colon is refused rather than used as a filename.
fn trailing_segment(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .map(ToString::to_string)
}
