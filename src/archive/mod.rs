pub mod document;
pub mod index;
pub mod media;
pub mod slug;
pub mod writer;

pub use document::{ArchiveEntry, FrontMatter};
pub use index::existing_ids;
pub use media::{fetch_media, MediaStats};
pub use slug::post_slug;
pub use writer::write_entry;
