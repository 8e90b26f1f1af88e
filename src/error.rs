use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{message}")]
    Validation { message: String, field: &'static str },

    #[error("{message}")]
    Response { message: String, status: u16 },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("teloxide error: {0}")]
    Teloxide(#[from] teloxide::RequestError),

    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("other: {0}")]
    Other(String),
}

impl Error {
    #[inline]
    pub fn other(text: impl Into<String>) -> Self {
        Self::Other(text.into())
    }

    #[inline]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field,
        }
    }

    #[inline]
    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self::Response {
            message: message.into(),
            status,
        }
    }

    /// Text shown to the chat user when a lookup fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, field } => {
                format!("Validation error: {message}, field: {field}")
            }
            Self::Response { message, status } => {
                format!("Response error: {message}, status code: {status}")
            }
            Self::Other(message) | Self::InvalidConfig(message) => {
                format!("An unexpected error occurred: {message}")
            }
            Self::Http(err) => format!("An unexpected error occurred: {err}"),
            Self::Json(err) => format!("An unexpected error occurred: {err}"),
            Self::Teloxide(err) => format!("An unexpected error occurred: {err}"),
            Self::MissingEnv(_) => format!("An unexpected error occurred: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
