use crate::{
    error::{Error, Result},
    tikapi::DEFAULT_MAX_COMMENT_PAGES,
};
use std::{env, fmt, time::Duration};
use url::Url;

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub tikapi: TikApiConfig,
}

#[derive(Clone)]
pub struct TikApiConfig {
    pub api_key: String,
    pub base_url: Url,
    pub country: String,
    pub timeout: Duration,
    pub max_comment_pages: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// - `Error::MissingEnv` if `BOT_TOKEN` (or `TELOXIDE_TOKEN`) or `TIKAPI_KEY` is unset.
    /// - `Error::InvalidConfig` if an optional variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let bot_token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(Error::MissingEnv("BOT_TOKEN"))?;

        Ok(Self {
            bot_token,
            tikapi: TikApiConfig::from_lookup(get)?,
        })
    }
}

impl TikApiConfig {
    const DEFAULT_BASE_URL: &'static str = "https://api.tikapi.io/";
    const DEFAULT_COUNTRY: &'static str = "us";
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Configuration pointing at the public API with default settings.
    ///
    /// # Panics
    ///
    /// Never in practice: the default base URL is a valid constant.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Url::parse(Self::DEFAULT_BASE_URL).expect("default base url is valid"),
            country: Self::DEFAULT_COUNTRY.into(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            max_comment_pages: DEFAULT_MAX_COMMENT_PAGES,
        }
    }

    /// Point the client at another base URL (mock servers, proxies).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `base_url` is not an absolute URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = get("TIKAPI_KEY").ok_or(Error::MissingEnv("TIKAPI_KEY"))?;
        let mut config = Self::new(api_key);

        if let Some(base_url) = get("TIKAPI_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }
        if let Some(country) = get("TIKAPI_COUNTRY") {
            config.country = country.to_lowercase();
        }
        if let Some(secs) = get("TIKAPI_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_number("TIKAPI_TIMEOUT_SECS", &secs)?);
        }
        if let Some(pages) = get("COMMENTS_MAX_PAGES") {
            config.max_comment_pages = parse_number::<usize>("COMMENTS_MAX_PAGES", &pages)?.max(1);
        }

        Ok(config)
    }
}

/// Base URLs must end with `/` so that `Url::join` appends endpoint paths.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|e| Error::InvalidConfig(format!("TIKAPI_BASE_URL: {e}")))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{key} must be a non-negative integer")))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("tikapi", &self.tikapi)
            .finish()
    }
}

impl fmt::Debug for TikApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TikApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("country", &self.country)
            .field("timeout", &self.timeout)
            .field("max_comment_pages", &self.max_comment_pages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "123:abc"), ("TIKAPI_KEY", "key")]))
                .unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.tikapi.api_key, "key");
        assert_eq!(config.tikapi.base_url.as_str(), "https://api.tikapi.io/");
        assert_eq!(config.tikapi.country, "us");
        assert_eq!(config.tikapi.timeout, Duration::from_secs(30));
        assert_eq!(config.tikapi.max_comment_pages, DEFAULT_MAX_COMMENT_PAGES);
    }

    #[test]
    fn teloxide_token_fallback() {
        let config =
            Config::from_lookup(lookup(&[("TELOXIDE_TOKEN", "t"), ("TIKAPI_KEY", "key")])).unwrap();
        assert_eq!(config.bot_token, "t");
    }

    #[test]
    fn missing_bot_token() {
        let err = Config::from_lookup(lookup(&[("TIKAPI_KEY", "key")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("BOT_TOKEN")));
    }

    #[test]
    fn blank_api_key_is_missing() {
        let err =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("TIKAPI_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("TIKAPI_KEY")));
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("TIKAPI_KEY", "key"),
            ("TIKAPI_BASE_URL", "http://127.0.0.1:8080/api"),
            ("TIKAPI_COUNTRY", "DE"),
            ("TIKAPI_TIMEOUT_SECS", "5"),
            ("COMMENTS_MAX_PAGES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.tikapi.base_url.as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(config.tikapi.country, "de");
        assert_eq!(config.tikapi.timeout, Duration::from_secs(5));
        assert_eq!(config.tikapi.max_comment_pages, 1);
    }

    #[test]
    fn invalid_number() {
        let err = Config::from_lookup(lookup(&[
            ("BOT_TOKEN", "t"),
            ("TIKAPI_KEY", "key"),
            ("TIKAPI_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "secret-token"), ("TIKAPI_KEY", "secret-key")]))
                .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-token"));
        assert!(!debug.contains("secret-key"));
    }
}
