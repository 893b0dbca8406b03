//! The incremental sync loop: page through the remote feed newest-first,
//! stop at the first already-archived post, archive everything newer.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::archive::{self, ArchiveEntry};
use crate::config::Config;
use crate::constants::POST_FILTER;
use crate::normalize::normalize;
use crate::tumblr::{Post, TumblrClient};

/// What one sync run accomplished.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOutcome {
    /// Posts newly archived this run.
    pub archived: usize,
    /// Posts that failed and were skipped; details are in the log.
    pub failed: usize,
    /// Pages fetched from the remote feed, the terminal empty page included.
    pub pages: usize,
    /// Whether the run stopped by reaching an already-archived post rather
    /// than by exhausting the feed.
    pub halted_on_known: bool,
}

/// Run one full incremental sync against the configured blog.
///
/// Pages through the feed newest-first. Processing stops at the first post
/// whose id is already archived: the feed is newest-first, so everything at
/// and beyond that point was covered by an earlier run. A page processed
/// without hitting a known post advances the offset after a politeness delay;
/// an empty wire page means the feed is exhausted. A page whose posts were
/// all skipped as unsupported types is not exhaustion and advances the
/// offset like any other.
///
/// Per-post failures are logged and counted but never stop the run. A failed
/// page fetch aborts the run with an error; everything archived so far stays
/// on disk and the next invocation resumes from the dedup scan.
///
/// # Errors
///
/// Returns an error if the archive root cannot be prepared, the initial scan
/// fails, or a page fetch fails.
pub async fn sync_once(http: &reqwest::Client, config: &Config) -> Result<SyncOutcome> {
    tokio::fs::create_dir_all(&config.archive_dir)
        .await
        .with_context(|| {
            format!("Failed to create archive directory: {}", config.archive_dir.display())
        })?;

    // One scan per run, and the set stays a snapshot: ids archived by this
    // run are deliberately not added. If the feed grows mid-run and shifted
    // pagination re-serves a just-written post, it is harmlessly re-archived
    // instead of halting the run before the older posts were ever seen.
    let existing = archive::existing_ids(&config.archive_dir)
        .await
        .context("Failed to scan existing archive")?;
    debug!(known = existing.len(), "Scanned existing archive");

    let client = TumblrClient::new(&config.blog_url, http.clone());
    let mut outcome = SyncOutcome::default();
    let mut offset = 0;

    loop {
        let page = client
            .list(POST_FILTER, config.page_size, offset)
            .await
            .with_context(|| format!("Failed to fetch post page at offset {offset}"))?;
        outcome.pages += 1;

        if page.total == 0 {
            debug!(offset, "Feed exhausted");
            break;
        }

        for post in &page.posts {
            if existing.contains(&post.id) {
                info!(id = %post.id, "Reached an already-archived post, halting");
                outcome.halted_on_known = true;
                break;
            }
            match archive_post(http, config, post).await {
                Ok(title) => {
                    info!(id = %post.id, title = %title, "Archived post");
                    outcome.archived += 1;
                }
                Err(e) => {
                    error!(id = %post.id, "Failed to archive post: {e:#}");
                    outcome.failed += 1;
                }
            }
        }

        if outcome.halted_on_known {
            break;
        }

        offset += config.page_size;
        tokio::time::sleep(config.page_delay).await;
    }

    Ok(outcome)
}

/// Archive a single post: slug, normalize, mirror media, then write the
/// document last. The document is the commit marker; a run killed partway
/// through leaves the post looking unarchived and it is retried next time.
async fn archive_post(http: &reqwest::Client, config: &Config, post: &Post) -> Result<String> {
    let slug = archive::post_slug(post)?;
    let content = normalize(post);

    let media_dir = config.archive_dir.join(&slug);
    let stats = archive::fetch_media(http, &media_dir, &content.media).await?;
    if stats.failed > 0 {
        warn!(
            id = %post.id,
            failed = stats.failed,
            downloaded = stats.downloaded,
            "Post archived with missing media"
        );
    }

    let entry = ArchiveEntry {
        slug,
        title: content.title.clone(),
        kind: post.kind.type_name(),
        date: post.date.clone(),
        id: post.id.clone(),
        link: post.url_with_slug.clone(),
        body: content.body,
    };
    archive::write_entry(&config.archive_dir, &entry).await?;

    Ok(content.title)
}

/// Re-run the sync on a fixed interval, forever. Errors are logged and the
/// next run proceeds; the dedup scan makes every run independently safe.
pub async fn watch_loop(http: reqwest::Client, config: Config, interval: Duration) {
    loop {
        match sync_once(&http, &config).await {
            Ok(outcome) => {
                info!(
                    archived = outcome.archived,
                    failed = outcome.failed,
                    pages = outcome.pages,
                    halted_on_known = outcome.halted_on_known,
                    "Sync finished"
                );
            }
            Err(e) => {
                error!("Sync failed: {e:#}");
            }
        }
        tokio::time::sleep(interval).await;
    }
}
