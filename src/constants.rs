//! Shared constants used across the application.

/// User agent string sent with every outbound HTTP request.
pub const ARCHIVER_USER_AGENT: &str = "tumblr-post-archiver/0.1";

/// Extension of archive front-matter documents, without the leading dot.
///
/// Archives written by earlier tooling use the same extension; changing it
/// would make existing documents invisible to the dedup scan.
pub const DOCUMENT_EXT: &str = "markdown";

/// Server-side content filter passed to the post listing endpoint.
/// `"none"` asks the API for raw, unfiltered post bodies.
pub const POST_FILTER: &str = "none";
