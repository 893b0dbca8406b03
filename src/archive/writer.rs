use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::DOCUMENT_EXT;

use super::document::{render_document, ArchiveEntry};

/// Write `entry`'s front-matter document under `archive_dir`, returning the
/// final path.
///
/// The document is staged as a sibling `.tmp` file and renamed into place, so
/// a crash mid-write never leaves a half document under the real name. The
/// document is the marker that a post is archived, which is why callers write
/// it after the post's media, never before. An existing document of the same
/// name is replaced.
///
/// # Errors
///
/// Returns an error if the staging write or the rename fails.
pub async fn write_entry(archive_dir: &Path, entry: &ArchiveEntry) -> Result<PathBuf> {
    let path = archive_dir.join(format!("{}.{DOCUMENT_EXT}", entry.slug));
    let staging = archive_dir.join(format!("{}.{DOCUMENT_EXT}.tmp", entry.slug));

    let contents = render_document(entry);

    tokio::fs::write(&staging, &contents)
        .await
        .with_context(|| format!("Failed to write archive document: {}", staging.display()))?;
    tokio::fs::rename(&staging, &path)
        .await
        .with_context(|| format!("Failed to move archive document into place: {}", path.display()))?;

    Ok(path)
}
