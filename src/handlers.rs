//! Command and callback flows, independent of the chat transport.
//!
//! Each flow runs Extract, Fetch, Format in that order and always produces a
//! [`Reply`]; lookup failures are rendered into the reply instead of being
//! propagated.

use crate::{
    extract::{IdentifierKind, extract_username, extract_video_id},
    format::{COMMENTS_DISPLAY_LIMIT, format_comments, format_user_profile, format_video_record},
    reply::Reply,
    tikapi::LookupClient,
};
use tracing::{info, warn};

pub const USER_USAGE: &str = "Please provide a username. Example: /user datngo2994";
pub const VIDEO_USAGE: &str = "Please provide a TikTok video URL. Example: /video <video_url>";
pub const FETCHING_COMMENTS: &str = "⏳ Fetching comments...";
pub const WELCOME: &str = "Welcome to the TikTok User Info Bot!\n\
Use /user <username> to fetch user information.\n\
Use /video <video_url> to fetch video information.";

/// First whitespace separated token of a command argument, if any.
#[must_use]
pub fn first_argument(args: &str) -> Option<&str> {
    args.split_whitespace().next()
}

/// `/user <username|profile-url>`
pub async fn user_lookup(client: &dyn LookupClient, args: &str) -> Reply {
    let Some(input) = first_argument(args) else {
        return Reply::plain(USER_USAGE);
    };
    let username = extract_username(input);
    info!(%username, kind = ?IdentifierKind::classify(input), "user lookup");

    match client.fetch_user_profile(&username).await {
        Ok(profile) => Reply::markdown(format_user_profile(&profile)),
        Err(err) => {
            warn!(%username, %err, "user lookup failed");
            Reply::plain(err.user_message())
        }
    }
}

/// `/video <video-url|id>`
pub async fn video_lookup(client: &dyn LookupClient, args: &str) -> Reply {
    let Some(input) = first_argument(args) else {
        return Reply::plain(VIDEO_USAGE);
    };
    let video_id = extract_video_id(input);
    info!(%video_id, kind = ?IdentifierKind::classify(input), "video lookup");

    match client.fetch_video_record(&video_id).await {
        Ok(video) => {
            let (text, actions) = format_video_record(&video);
            Reply::markdown(text).with_actions(actions)
        }
        Err(err) => {
            warn!(%video_id, %err, "video lookup failed");
            Reply::plain(err.user_message())
        }
    }
}

/// Comments for the video behind a "View Comments" button.
pub async fn comments_lookup(client: &dyn LookupClient, video_id: &str) -> Reply {
    info!(video_id, "comments lookup");

    match client
        .fetch_video_comments(video_id, COMMENTS_DISPLAY_LIMIT)
        .await
    {
        Ok(comments) => Reply::markdown(format_comments(&comments)),
        Err(err) => {
            warn!(video_id, %err, "comments lookup failed");
            Reply::plain(err.user_message())
        }
    }
}
