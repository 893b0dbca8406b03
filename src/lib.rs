//! Tumblr Post Archiver library.
//!
//! Incrementally mirrors a Tumblr blog's posts and embedded media to a local
//! flat-file archive: one front-matter document per post plus a sibling
//! directory of downloaded media. Syncs are resumable and idempotent; a run
//! stops paging as soon as it reaches a post that is already on disk.

pub mod archive;
pub mod config;
pub mod constants;
pub mod normalize;
pub mod sync;
pub mod tumblr;
