/// A single post fetched from the remote blog.
#[derive(Debug, Clone)]
pub struct Post {
    /// Opaque stable identifier assigned by the remote service.
    pub id: String,
    /// Canonical URL including the human-readable slug segment.
    pub url_with_slug: String,
    /// Publish time as a unix timestamp.
    pub timestamp: i64,
    /// Display date string as served by the API; written verbatim to the archive.
    pub date: String,
    /// Type-specific payload.
    pub kind: PostKind,
}

/// The closed set of post shapes the read API serves.
///
/// Keeping this a sum type rather than a bag of optional fields makes the
/// content normalizer's dispatch exhaustive: adding a variant will not compile
/// until every consumer handles it.
#[derive(Debug, Clone)]
pub enum PostKind {
    Regular {
        title: String,
        body: String,
    },
    Link {
        text: String,
        url: String,
        description: String,
    },
    Quote {
        text: String,
        source: String,
    },
    Photo {
        caption: String,
        /// Largest single-photo URL the API serves.
        url: String,
        /// Ordered photoset URLs; empty for single-photo posts.
        photoset: Vec<String>,
    },
    Audio {
        caption: String,
        player: String,
    },
    Video {
        caption: String,
        source: String,
        player: String,
    },
}

impl PostKind {
    /// The wire name of this post type, as written to the `type` front-matter key.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            PostKind::Regular { .. } => "regular",
            PostKind::Link { .. } => "link",
            PostKind::Quote { .. } => "quote",
            PostKind::Photo { .. } => "photo",
            PostKind::Audio { .. } => "audio",
            PostKind::Video { .. } => "video",
        }
    }
}
