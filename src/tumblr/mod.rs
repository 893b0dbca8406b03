mod client;
mod post;

pub use client::{PostPage, TumblrClient};
pub use post::{Post, PostKind};
