use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::constants::DOCUMENT_EXT;

use super::document::parse_front_matter;

/// Collect the ids of every post already archived under `archive_dir`.
///
/// Scans the front-matter documents directly inside the root; media
/// directories are siblings and never descended into. A document that cannot
/// be read or parsed is skipped with a warning and treated as not archived,
/// so the post is re-fetched and the torn file overwritten on this run. That
/// is the recovery path after an interrupted write.
///
/// # Errors
///
/// Returns an error only if the directory listing itself fails; per-file
/// problems never abort the scan.
pub async fn existing_ids(archive_dir: &Path) -> Result<HashSet<String>> {
    let mut ids = HashSet::new();

    let mut entries = tokio::fs::read_dir(archive_dir)
        .await
        .with_context(|| format!("Failed to read archive directory: {}", archive_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXT) {
            continue;
        }
        if !entry.file_type().await.is_ok_and(|t| t.is_file()) {
            continue;
        }

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %path.display(), "Skipping unreadable archive document: {e}");
                continue;
            }
        };

        match parse_front_matter(&text) {
            Ok(meta) => {
                ids.insert(meta.id);
            }
            Err(e) => {
                warn!(path = %path.display(), "Skipping malformed archive document: {e:#}");
            }
        }
    }

    Ok(ids)
}
