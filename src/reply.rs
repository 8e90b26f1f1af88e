use std::fmt::Display;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

const VIEW_COMMENTS_PREFIX: &str = "view_comments";

/// How the transport should interpret reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    MarkdownV2,
}

/// Transport independent description of a message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: TextFormat,
    pub actions: Vec<Action>,
}

impl Reply {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::MarkdownV2,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// Inline keyboard with one button per row, or `None` when there are no actions.
    #[must_use]
    pub fn keyboard(&self) -> Option<InlineKeyboardMarkup> {
        if self.actions.is_empty() {
            return None;
        }
        let rows = self
            .actions
            .iter()
            .map(|action| vec![action.to_button()])
            .collect::<Vec<_>>();
        Some(InlineKeyboardMarkup::new(rows))
    }
}

/// A button attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Opens an external link.
    Link { label: String, url: Url },
    /// Sends `data` back to the bot when pressed.
    Callback { label: String, data: String },
}

impl Action {
    #[must_use]
    pub fn to_button(&self) -> InlineKeyboardButton {
        match self {
            Self::Link { label, url } => InlineKeyboardButton::url(label.clone(), url.clone()),
            Self::Callback { label, data } => {
                InlineKeyboardButton::callback(label.clone(), data.clone())
            }
        }
    }
}

/// Decoded callback button payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    ViewComments { video_id: String },
}

impl CallbackAction {
    /// Parse callback data such as `view_comments:555`.
    #[must_use]
    pub fn parse(data: &str) -> Option<Self> {
        match data.split_once(':') {
            Some((VIEW_COMMENTS_PREFIX, id)) if !id.is_empty() => Some(Self::ViewComments {
                video_id: id.to_owned(),
            }),
            _ => None,
        }
    }

    /// Encode into the string carried by the inline button.
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl Display for CallbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ViewComments { video_id } => write!(f, "{VIEW_COMMENTS_PREFIX}:{video_id}"),
        }
    }
}
