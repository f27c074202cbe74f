//! Endpoint and credential settings, read from the environment.

use paint_core::consult::MODEL_ID;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeminiConfigError {
    #[error("no API key found; set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: MODEL_ID.to_string(),
        }
    }

    pub fn with_base_url(
        mut self,
        base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, GeminiConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GeminiConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| non_blank(name))
            .ok_or(GeminiConfigError::MissingApiKey)?;

        let config = Self::new(api_key);
        Ok(match non_blank(BASE_URL_VAR) {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        })
    }
}
