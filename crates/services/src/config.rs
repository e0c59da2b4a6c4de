use std::env;
use std::time::Duration;

use assesify_core::model::AnswerMatch;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "ASSESIFY_API_URL";
pub const ENV_ANSWER_MATCH: &str = "ASSESIFY_ANSWER_MATCH";
pub const ENV_TIMEOUT_SECS: &str = "ASSESIFY_HTTP_TIMEOUT_SECS";

/// Where the API lives and how the client talks to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    pub answer_match: AnswerMatch,
    pub timeout: Duration,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when the URL does not parse or is not http(s).
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            answer_match: AnswerMatch::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Read `ASSESIFY_*` variables, falling back to local-development defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like `from_env`, with an injectable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for values that are set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let set = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base = set(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&base)?;

        if let Some(raw) = set(ENV_ANSWER_MATCH) {
            config.answer_match =
                AnswerMatch::parse(&raw).ok_or(ConfigError::InvalidAnswerMatch(raw))?;
        }
        if let Some(raw) = set(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_answer_match(mut self, answer_match: AnswerMatch) -> Self {
        self.answer_match = answer_match;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL, always ending in `/` so relative joins append.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|source| ConfigError::InvalidUrl {
        raw: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(raw.to_string()));
    }
    Ok(url)
}
