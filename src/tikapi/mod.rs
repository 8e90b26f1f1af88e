mod client;
pub mod models;

pub use client::{COMMENTS_PAGE_SIZE, DEFAULT_MAX_COMMENT_PAGES, LookupClient, TikApiClient};
pub use models::{Comment, CommentPage, UserProfile, VideoRecord};
