//! Gemini text-generation backend for the consultation relay.
//!
//! Wraps the `generateContent` REST endpoint using [`reqwest`] and exposes
//! it as a [`CompletionService`].

pub mod config;
mod wire;

use async_trait::async_trait;
use paint_core::{CompletionError, CompletionService};
use tracing::{debug, warn};

pub use config::{DEFAULT_BASE_URL, GeminiConfig, GeminiConfigError};

/// HTTP client for the Gemini API.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        config: GeminiConfig,
    ) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    // ---- private helpers ----

    /// Returns the body of a 2xx response, or [`CompletionError::Api`]
    /// carrying the status and body text.
    async fn success_body(response: reqwest::Response) -> Result<String, CompletionError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if !status.is_success() {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, CompletionError> {
        let request = wire::GenerateContentRequest::new(prompt, system_instruction);
        let url = self.endpoint();
        debug!(%url, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let body = Self::success_body(response).await.inspect_err(|error| {
            warn!(%error, "generateContent request rejected");
        })?;

        let parsed: wire::GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| CompletionError::Malformed(e.to_string()))?;

        Ok(parsed.text())
    }
}
