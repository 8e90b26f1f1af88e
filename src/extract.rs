//! Normalization of user supplied TikTok references into the identifiers the
//! API expects.
//!
//! Extraction never fails: input that matches no known URL shape is assumed to
//! already be a handle or a video ID and is returned unchanged.

use crate::lazy_regex;

lazy_regex!(fn profile_regex, r"^https?://(?:www\.)?tiktok\.com/@([^/?#\s]+)");
lazy_regex!(fn video_regex, r"^https?://(?:www\.|m\.)?tiktok\.com/.*?/video/(\d+)");
lazy_regex!(fn short_link_regex, r"^https?://(?:vm|vt)\.tiktok\.com/([A-Za-z0-9_-]+)");

/// Classified form of an identifier as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    RawHandle,
    ProfileUrl,
    VideoUrl,
    ShortVideoUrl,
}

impl IdentifierKind {
    /// Classify `input` by which URL shape it matches.
    #[must_use]
    pub fn classify(input: &str) -> Self {
        if video_regex().is_match(input) {
            Self::VideoUrl
        } else if short_link_regex().is_match(input) {
            Self::ShortVideoUrl
        } else if profile_regex().is_match(input) {
            Self::ProfileUrl
        } else {
            Self::RawHandle
        }
    }
}

/// Extract a handle from a profile URL such as `https://www.tiktok.com/@alice`.
#[must_use]
pub fn extract_username(input: &str) -> String {
    capture(profile_regex(), input).unwrap_or_else(|| input.to_owned())
}

/// Extract a video ID from a full video URL or a short link.
#[must_use]
pub fn extract_video_id(input: &str) -> String {
    capture(video_regex(), input)
        .or_else(|| capture(short_link_regex(), input))
        .unwrap_or_else(|| input.to_owned())
}

fn capture(re: &regex::Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1).map(|m| m.as_str().to_owned()))
}
