use crate::{
    config::TikApiConfig,
    error::{Error, Result},
    tikapi::models::{
        CheckPayload, Comment, CommentListPayload, CommentPage, Status, UserProfile, VideoPayload,
        VideoRecord,
    },
};
use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Number of comments requested per page.
pub const COMMENTS_PAGE_SIZE: usize = 20;
/// Default cap on comment pages fetched per lookup.
pub const DEFAULT_MAX_COMMENT_PAGES: usize = 5;

/// Read-only lookups against the TikTok data API.
#[async_trait]
pub trait LookupClient: Send + Sync {
    /// Fetch a user profile by handle.
    async fn fetch_user_profile(&self, username: &str) -> Result<UserProfile>;

    /// Fetch video metadata by numeric video ID.
    async fn fetch_video_record(&self, video_id: &str) -> Result<VideoRecord>;

    /// Fetch a single page of comments. `cursor` is `None` for the first page.
    async fn fetch_comment_page(&self, video_id: &str, cursor: Option<&str>)
    -> Result<CommentPage>;

    /// Upper bound on the number of pages [`LookupClient::fetch_video_comments`] requests.
    fn max_comment_pages(&self) -> usize {
        DEFAULT_MAX_COMMENT_PAGES
    }

    /// Collect up to `limit` comments, following continuation cursors.
    ///
    /// At least one page is always requested. Paging stops when a page is
    /// empty, carries no cursor, enough comments are collected, or
    /// [`LookupClient::max_comment_pages`] is reached.
    async fn fetch_video_comments(&self, video_id: &str, limit: usize) -> Result<Vec<Comment>> {
        let max_pages = self.max_comment_pages().max(1);
        let mut comments = Vec::new();
        let mut cursor: Option<String> = None;

        for page_no in 1..=max_pages {
            let page = self.fetch_comment_page(video_id, cursor.as_deref()).await?;
            let exhausted = page.comments.is_empty();
            comments.extend(page.comments);
            cursor = page.cursor;

            if exhausted || comments.len() >= limit || cursor.is_none() {
                break;
            }
            if page_no == max_pages {
                warn!(video_id, pages = max_pages, "comment page limit reached");
            }
        }

        comments.truncate(limit);
        Ok(comments)
    }
}

/// HTTP client for `api.tikapi.io`.
#[derive(Debug, Clone)]
pub struct TikApiClient {
    http: Client,
    config: TikApiConfig,
}

impl TikApiClient {
    /// Build a client from explicit configuration.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidConfig` if the API key is not a valid header value.
    /// - `Error::Http` if the underlying HTTP client cannot be built.
    pub fn new(config: TikApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| Error::InvalidConfig("TIKAPI_KEY contains invalid characters".into()))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|e| Error::other(format!("invalid endpoint {path}: {e}")))?;
        debug!(%url, "tikapi request");

        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let envelope = serde_json::from_slice::<Status>(&body).unwrap_or_default();
        if !status.is_success() || envelope.status.as_deref() == Some("error") {
            let message = envelope.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_owned()
            });
            warn!(path, status = status.as_u16(), %message, "tikapi request failed");
            return Err(Error::response(status.as_u16(), message));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl LookupClient for TikApiClient {
    async fn fetch_user_profile(&self, username: &str) -> Result<UserProfile> {
        let username = require("username", username)?;
        info!(username, "fetching user profile");
        let payload: CheckPayload = self
            .get(
                "public/check",
                &[("username", username), ("country", self.config.country.as_str())],
            )
            .await?;
        Ok(UserProfile::from_payload(username, payload))
    }

    async fn fetch_video_record(&self, video_id: &str) -> Result<VideoRecord> {
        let video_id = require("id", video_id)?;
        info!(video_id, "fetching video record");
        let payload: VideoPayload = self.get("public/video", &[("id", video_id)]).await?;
        Ok(VideoRecord::from_payload(video_id, payload))
    }

    async fn fetch_comment_page(
        &self,
        video_id: &str,
        cursor: Option<&str>,
    ) -> Result<CommentPage> {
        let video_id = require("media_id", video_id)?;
        let count = COMMENTS_PAGE_SIZE.to_string();
        let mut query = vec![("media_id", video_id), ("count", count.as_str())];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }
        debug!(video_id, ?cursor, "fetching comment page");
        let payload: CommentListPayload = self.get("comment/list", &query).await?;
        Ok(payload.into())
    }

    fn max_comment_pages(&self) -> usize {
        self.config.max_comment_pages
    }
}

/// Reject blank identifiers before they reach the network.
fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, format!("{field} is required")));
    }
    Ok(trimmed)
}
