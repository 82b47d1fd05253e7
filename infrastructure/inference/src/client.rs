use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use business::domain::receipt::services::{InferenceError, InferenceErrorKind};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Upper bound on how much of a provider error body is kept in messages.
const MAX_ERROR_BODY: usize = 300;

/// Vision model vendors the extractor can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceProvider {
    Anthropic,
    Gemini,
    OpenAI,
}

impl InferenceProvider {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            InferenceProvider::Anthropic => "https://api.anthropic.com",
            InferenceProvider::Gemini => "https://generativelanguage.googleapis.com",
            InferenceProvider::OpenAI => "https://api.openai.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            InferenceProvider::Anthropic => "claude-3-5-sonnet-latest",
            InferenceProvider::Gemini => "gemini-1.5-flash",
            InferenceProvider::OpenAI => "gpt-4o",
        }
    }

    /// Provider-specific environment variable holding the API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            InferenceProvider::Anthropic => "ANTHROPIC_API_KEY",
            InferenceProvider::Gemini => "GEMINI_API_KEY",
            InferenceProvider::OpenAI => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for InferenceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceProvider::Anthropic => write!(f, "anthropic"),
            InferenceProvider::Gemini => write!(f, "gemini"),
            InferenceProvider::OpenAI => write!(f, "openai"),
        }
    }
}

impl FromStr for InferenceProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(InferenceProvider::Anthropic),
            "gemini" | "google" => Ok(InferenceProvider::Gemini),
            "openai" => Ok(InferenceProvider::OpenAI),
            other => Err(format!("Unknown inference provider: {}", other)),
        }
    }
}

/// Shared HTTP client configuration for inference providers.
pub struct InferenceHttpClient {
    pub client: Client,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: String,
}

impl InferenceHttpClient {
    pub fn new(
        api_key: Option<String>,
        model: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.filter(|model| !model.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.model.is_some()
    }

    /// API key and model, or `NotConfigured` when either is missing.
    pub fn credentials(&self) -> Result<(&str, &str), InferenceError> {
        match (self.api_key.as_deref(), self.model.as_deref()) {
            (Some(key), Some(model)) => Ok((key, model)),
            _ => Err(InferenceError::new(
                InferenceErrorKind::NotConfigured,
                "API key or model missing",
            )),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps a failed request (no HTTP status) to an inference error.
///
/// The request URL is dropped from the message.
pub fn transport_error(err: reqwest::Error) -> InferenceError {
    let kind = if err.is_timeout() {
        InferenceErrorKind::Timeout
    } else {
        InferenceErrorKind::Transport
    };
    InferenceError::new(kind, err.without_url().to_string())
}

/// Decodes a successful provider reply, classifying non-2xx statuses.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, InferenceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = InferenceError::from_status(status.as_u16(), error_message(&body));
        tracing::warn!(status = status.as_u16(), kind = %error.kind, "Inference provider returned an error");
        return Err(error);
    }

    response.json::<T>().await.map_err(|e| {
        InferenceError::new(
            InferenceErrorKind::InvalidResponse,
            format!("Unexpected reply body: {}", e),
        )
    })
}

/// All three vendors nest the human-readable reason under `error.message`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect())
}

pub fn empty_reply() -> InferenceError {
    InferenceError::new(
        InferenceErrorKind::InvalidResponse,
        "Reply contained no text",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>, model: Option<&str>) -> InferenceHttpClient {
        InferenceHttpClient::new(
            api_key.map(str::to_string),
            model.map(str::to_string),
            "https://example.test/",
            Duration::from_secs(5),
        )
    }

    #[test]
    fn should_parse_provider_names() {
        assert_eq!(
            "Anthropic".parse::<InferenceProvider>(),
            Ok(InferenceProvider::Anthropic)
        );
        assert_eq!(
            " gemini ".parse::<InferenceProvider>(),
            Ok(InferenceProvider::Gemini)
        );
        assert_eq!(
            "openai".parse::<InferenceProvider>(),
            Ok(InferenceProvider::OpenAI)
        );
        assert!("mistral".parse::<InferenceProvider>().is_err());
    }

    #[test]
    fn should_be_configured_only_with_key_and_model() {
        assert!(client(Some("key"), Some("model")).is_configured());
        assert!(!client(None, Some("model")).is_configured());
        assert!(!client(Some("   "), Some("model")).is_configured());
        assert!(!client(Some("key"), None).is_configured());
    }

    #[test]
    fn should_report_not_configured_credentials() {
        let error = client(None, Some("model")).credentials().unwrap_err();
        assert_eq!(error.kind, InferenceErrorKind::NotConfigured);
    }

    #[test]
    fn should_join_endpoint_without_double_slash() {
        assert_eq!(
            client(Some("key"), Some("model")).endpoint("/v1/messages"),
            "https://example.test/v1/messages"
        );
    }

    #[test]
    fn should_extract_nested_error_message() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"Too many requests"}}"#;
        assert_eq!(error_message(body), "Too many requests");
        assert_eq!(error_message("plain failure"), "plain failure");
    }
}
