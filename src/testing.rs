//! Test doubles shared by the flow and transport tests.

use crate::{
    error::{Error, Result},
    tikapi::{Comment, CommentPage, LookupClient, UserProfile, VideoRecord},
};
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory client that records every identifier it receives.
#[derive(Default)]
pub struct FakeClient {
    calls: Mutex<Vec<String>>,
    fail_with: Option<fn() -> Error>,
    comments: Vec<Comment>,
}

impl FakeClient {
    pub fn failing(fail_with: fn() -> Error) -> Self {
        Self {
            fail_with: Some(fail_with),
            ..Self::default()
        }
    }

    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(id.to_owned());
        self.fail_with.map_or(Ok(()), |f| Err(f()))
    }
}

#[async_trait]
impl LookupClient for FakeClient {
    async fn fetch_user_profile(&self, username: &str) -> Result<UserProfile> {
        self.record(username)?;
        Ok(UserProfile {
            username: username.to_owned(),
            nickname: Some("Alice".into()),
            follower_count: Some(100),
            following_count: Some(7),
            like_count: Some(5000),
            video_count: Some(12),
        })
    }

    async fn fetch_video_record(&self, video_id: &str) -> Result<VideoRecord> {
        self.record(video_id)?;
        Ok(VideoRecord {
            id: video_id.to_owned(),
            author_username: Some("bob".into()),
            ..VideoRecord::default()
        })
    }

    async fn fetch_comment_page(
        &self,
        video_id: &str,
        _cursor: Option<&str>,
    ) -> Result<CommentPage> {
        self.record(video_id)?;
        Ok(CommentPage {
            comments: self.comments.clone(),
            cursor: None,
        })
    }
}
