//! Rendering of API entities as Telegram `MarkdownV2` text.
//!
//! Every dynamic value passes through [`escape`] so that user generated text
//! can never produce markup the chat client rejects.

use crate::{
    reply::{Action, CallbackAction},
    tikapi::{Comment, UserProfile, VideoRecord},
};
use std::fmt::Display;
use teloxide::utils::markdown::{bold, escape, italic, link};
use url::Url;

/// Maximum number of comments rendered in one message.
pub const COMMENTS_DISPLAY_LIMIT: usize = 10;
/// Telegram rejects messages longer than this.
pub const MESSAGE_LIMIT: usize = 4096;
/// Escaped length limits for individual fields.
pub const COMMENT_TEXT_LIMIT: usize = 300;
pub const DESCRIPTION_LIMIT: usize = 1000;
pub const NAME_LIMIT: usize = 100;
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_COMMENTS: &str = "No comments found for this video.";

const DOWNLOADER_LABEL: &str = "📥 Download Video via @downloader_tiktok_bot";
const DOWNLOADER_URL: &str = "https://t.me/downloader_tiktok_bot";
const VIEW_COMMENTS_LABEL: &str = "💬 View Comments";
const PROFILE_BASE_URL: &str = "https://www.tiktok.com/@";

#[must_use]
pub fn format_user_profile(profile: &UserProfile) -> String {
    join_within(
        [
            bold(&escape("👤 TikTok User")),
            format!("👤 Username: {}", escape_capped(&profile.username, NAME_LIMIT)),
            format!("📛 Nickname: {}", name_or_na(profile.nickname.as_deref())),
            format!("👥 Followers: {}", or_na(profile.follower_count)),
            format!("🔗 Following: {}", or_na(profile.following_count)),
            format!("❤️ Likes: {}", or_na(profile.like_count)),
            format!("🎥 Videos: {}", or_na(profile.video_count)),
        ],
        MESSAGE_LIMIT,
    )
}

/// Render video metadata together with its buttons: an external downloader
/// link and a "view comments" callback carrying the video ID.
#[must_use]
pub fn format_video_record(video: &VideoRecord) -> (String, Vec<Action>) {
    let description = video
        .description
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map_or_else(
            || escape(NOT_AVAILABLE),
            |d| italic(&escape_capped(&single_line(d), DESCRIPTION_LIMIT)),
        );

    let text = join_within(
        [
            bold(&escape("🎥 Video Information")),
            format!("👤 Username: {}", name_or_na(video.author_username.as_deref())),
            format!("📛 Nickname: {}", name_or_na(video.author_nickname.as_deref())),
            format!("📝 Description: {description}"),
            format!("👁️ Views: {}", or_na(video.view_count)),
            format!("❤️ Likes: {}", or_na(video.like_count)),
            format!("💬 Comments: {}", or_na(video.comment_count)),
            format!("🔗 Shares: {}", or_na(video.share_count)),
        ],
        MESSAGE_LIMIT,
    );

    (text, video_actions(&video.id))
}

fn video_actions(video_id: &str) -> Vec<Action> {
    let mut actions = Vec::with_capacity(2);
    if let Ok(url) = Url::parse(DOWNLOADER_URL) {
        actions.push(Action::Link {
            label: DOWNLOADER_LABEL.into(),
            url,
        });
    }
    actions.push(Action::Callback {
        label: VIEW_COMMENTS_LABEL.into(),
        data: CallbackAction::ViewComments {
            video_id: video_id.to_owned(),
        }
        .encode(),
    });
    actions
}

/// Render up to [`COMMENTS_DISPLAY_LIMIT`] comments, one line each.
///
/// Comments that would push the message past [`MESSAGE_LIMIT`] are dropped.
#[must_use]
pub fn format_comments(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return escape(NO_COMMENTS);
    }

    join_within(
        comments
            .iter()
            .take(COMMENTS_DISPLAY_LIMIT)
            .enumerate()
            .map(|(i, comment)| format_comment(i + 1, comment)),
        MESSAGE_LIMIT,
    )
}

fn format_comment(position: usize, comment: &Comment) -> String {
    let author = comment.username.as_deref().map_or_else(
        || escape("unknown user"),
        |username| {
            link(
                &format!("{PROFILE_BASE_URL}{username}"),
                &escape_capped(&format!("@{username}"), NAME_LIMIT),
            )
        },
    );
    format!(
        "{} {} — by {author}",
        escape(&format!("{position}.")),
        escape_capped(&single_line(&comment.text), COMMENT_TEXT_LIMIT),
    )
}

fn or_na<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| escape(NOT_AVAILABLE), |v| escape(&v.to_string()))
}

fn name_or_na(value: Option<&str>) -> String {
    value.map_or_else(
        || escape(NOT_AVAILABLE),
        |v| escape_capped(&single_line(v), NAME_LIMIT),
    )
}

/// Collapse line breaks and runs of whitespace into single spaces.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape `text`, cutting it so the escaped form is at most `limit` characters.
fn escape_capped(text: &str, limit: usize) -> String {
    let escaped = escape(text);
    if escaped.chars().count() <= limit {
        return escaped;
    }

    let ellipsis = escape("...");
    let budget = limit.saturating_sub(ellipsis.chars().count());
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let piece = escape(c.encode_utf8(&mut [0; 4]));
        let len = piece.chars().count();
        if used + len > budget {
            break;
        }
        used += len;
        out.push_str(&piece);
    }
    out.push_str(&ellipsis);
    out
}

/// Join lines with `\n`, stopping before the first line that would exceed `limit`.
fn join_within(lines: impl IntoIterator<Item = String>, limit: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for line in lines {
        let len = line.chars().count() + usize::from(!out.is_empty());
        if used + len > limit {
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&line);
        used += len;
    }
    out
}
