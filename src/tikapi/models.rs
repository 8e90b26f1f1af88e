use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Public profile of a TikTok user. `None` means the API did not report the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub nickname: Option<String>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub like_count: Option<u64>,
    pub video_count: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub author_username: Option<String>,
    pub author_nickname: Option<String>,
    pub description: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub share_count: Option<u64>,
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub username: Option<String>,
}

/// One page of comments plus the cursor for the next page, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPage {
    pub comments: Vec<Comment>,
    pub cursor: Option<String>,
}

impl UserProfile {
    /// Build a profile from a `public/check` payload. `username` is the handle
    /// that was requested and is used when the payload omits `uniqueId`.
    #[must_use]
    pub fn from_payload(username: &str, payload: CheckPayload) -> Self {
        let info = payload.user_info.unwrap_or_default();
        let user = info.user.unwrap_or_default();
        let stats = info.stats.unwrap_or_default();
        Self {
            username: user.unique_id.unwrap_or_else(|| username.to_owned()),
            nickname: user.nickname,
            follower_count: stats.follower_count,
            following_count: stats.following_count,
            like_count: stats.heart_count,
            video_count: stats.video_count,
        }
    }
}

impl VideoRecord {
    #[must_use]
    pub fn from_payload(video_id: &str, payload: VideoPayload) -> Self {
        let item = payload
            .item_info
            .and_then(|i| i.item_struct)
            .unwrap_or_default();
        let author = item.author.unwrap_or_default();
        let stats = item.stats.unwrap_or_default();
        Self {
            id: item.id.unwrap_or_else(|| video_id.to_owned()),
            author_username: author.unique_id,
            author_nickname: author.nickname,
            description: item.desc,
            view_count: stats.play_count,
            like_count: stats.digg_count,
            share_count: stats.share_count,
            comment_count: stats.comment_count,
        }
    }
}

impl From<CommentListPayload> for CommentPage {
    fn from(payload: CommentListPayload) -> Self {
        let comments = payload
            .comments
            .unwrap_or_default()
            .into_iter()
            .map(|c| Comment {
                text: c.text.unwrap_or_default(),
                username: c.user.and_then(|u| u.unique_id),
            })
            .collect();
        let cursor = if payload.has_more {
            payload.cursor.and_then(cursor_to_string)
        } else {
            None
        };
        Self { comments, cursor }
    }
}

fn cursor_to_string(value: Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// `has_more` is sent as `0`/`1` by some endpoints and as a boolean by others.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => matches!(s.as_str(), "1" | "true"),
        _ => false,
    })
}

/// Envelope fields shared by every API response.
#[derive(Debug, Default, Deserialize)]
pub struct Status {
    pub status: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckPayload {
    #[serde(rename = "userInfo")]
    user_info: Option<UserInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct UserInfo {
    user: Option<Author>,
    stats: Option<UserStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Author {
    unique_id: Option<String>,
    nickname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserStats {
    follower_count: Option<u64>,
    following_count: Option<u64>,
    heart_count: Option<u64>,
    video_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VideoPayload {
    #[serde(rename = "itemInfo")]
    item_info: Option<ItemInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemInfo {
    item_struct: Option<ItemStruct>,
}

#[derive(Debug, Default, Deserialize)]
struct ItemStruct {
    id: Option<String>,
    desc: Option<String>,
    author: Option<Author>,
    stats: Option<VideoStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStats {
    play_count: Option<u64>,
    digg_count: Option<u64>,
    share_count: Option<u64>,
    comment_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CommentListPayload {
    comments: Option<Vec<RawComment>>,
    cursor: Option<Value>,
    #[serde(default, deserialize_with = "truthy")]
    has_more: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawComment {
    text: Option<String>,
    user: Option<CommentUser>,
}

#[derive(Debug, Default, Deserialize)]
struct CommentUser {
    unique_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_from_full_payload() {
        let payload: CheckPayload = serde_json::from_value(json!({
            "status": "success",
            "userInfo": {
                "user": { "uniqueId": "alice", "nickname": "Alice A." },
                "stats": {
                    "followerCount": 1200,
                    "followingCount": 15,
                    "heartCount": 98000,
                    "videoCount": 42
                }
            }
        }))
        .unwrap();

        let profile = UserProfile::from_payload("alice", payload);
        assert_eq!(
            profile,
            UserProfile {
                username: "alice".into(),
                nickname: Some("Alice A.".into()),
                follower_count: Some(1200),
                following_count: Some(15),
                like_count: Some(98000),
                video_count: Some(42),
            }
        );
    }

    #[test]
    fn profile_with_missing_fields() {
        let payload: CheckPayload =
            serde_json::from_value(json!({ "userInfo": { "stats": { "videoCount": 3 } } }))
                .unwrap();

        let profile = UserProfile::from_payload("ghost", payload);
        assert_eq!(profile.username, "ghost");
        assert_eq!(profile.nickname, None);
        assert_eq!(profile.follower_count, None);
        assert_eq!(profile.video_count, Some(3));
    }

    #[test]
    fn video_from_payload() {
        let payload: VideoPayload = serde_json::from_value(json!({
            "itemInfo": {
                "itemStruct": {
                    "id": "555",
                    "desc": "dance #fyp",
                    "author": { "uniqueId": "bob", "nickname": "Bobby" },
                    "stats": { "playCount": 10, "diggCount": 5, "shareCount": 1 }
                }
            }
        }))
        .unwrap();

        let video = VideoRecord::from_payload("555", payload);
        assert_eq!(video.id, "555");
        assert_eq!(video.author_username.as_deref(), Some("bob"));
        assert_eq!(video.description.as_deref(), Some("dance #fyp"));
        assert_eq!(video.view_count, Some(10));
        assert_eq!(video.comment_count, None);
    }

    #[test]
    fn empty_video_payload_keeps_requested_id() {
        let video = VideoRecord::from_payload("77", VideoPayload::default());
        assert_eq!(video.id, "77");
        assert_eq!(video.author_username, None);
    }

    #[test]
    fn comment_page_with_cursor() {
        let payload: CommentListPayload = serde_json::from_value(json!({
            "comments": [
                { "text": "first!", "user": { "unique_id": "carol" } },
                { "text": "nice", "user": {} }
            ],
            "cursor": 20,
            "has_more": 1
        }))
        .unwrap();

        let page = CommentPage::from(payload);
        assert_eq!(page.comments.len(), 2);
        assert_eq!(page.comments[0].username.as_deref(), Some("carol"));
        assert_eq!(page.comments[1].username, None);
        assert_eq!(page.cursor.as_deref(), Some("20"));
    }

    #[test]
    fn comment_page_without_more() {
        let payload: CommentListPayload = serde_json::from_value(json!({
            "comments": [{ "text": "last" }],
            "cursor": 40,
            "has_more": false
        }))
        .unwrap();

        assert_eq!(CommentPage::from(payload).cursor, None);
    }
}
