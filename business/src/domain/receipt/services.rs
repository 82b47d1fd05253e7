use async_trait::async_trait;

use super::model::EncodedImage;
use super::prompt::ExtractionPrompt;

/// Failure classes reported by an inference provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorKind {
    /// Credential or model missing at call time.
    NotConfigured,
    Unauthorized,
    RateLimited,
    Timeout,
    Unavailable,
    /// The provider refused the request itself (4xx other than auth/limits).
    Rejected,
    /// The provider answered, but not with usable text.
    InvalidResponse,
    Transport,
    Cancelled,
}

impl std::fmt::Display for InferenceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InferenceErrorKind::NotConfigured => write!(f, "not_configured"),
            InferenceErrorKind::Unauthorized => write!(f, "unauthorized"),
            InferenceErrorKind::RateLimited => write!(f, "rate_limited"),
            InferenceErrorKind::Timeout => write!(f, "timeout"),
            InferenceErrorKind::Unavailable => write!(f, "unavailable"),
            InferenceErrorKind::Rejected => write!(f, "rejected"),
            InferenceErrorKind::InvalidResponse => write!(f, "invalid_response"),
            InferenceErrorKind::Transport => write!(f, "transport"),
            InferenceErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Structured error from the inference boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("inference.{kind}: {message}")]
pub struct InferenceError {
    pub kind: InferenceErrorKind,
    pub http_status: Option<u16>,
    pub message: String,
}

impl InferenceError {
    pub fn new(kind: InferenceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            http_status: None,
            message: message.into(),
        }
    }

    /// Classifies a non-success HTTP status returned by a provider.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => InferenceErrorKind::Unauthorized,
            // 529 is Anthropic's "overloaded"
            429 | 529 => InferenceErrorKind::RateLimited,
            408 | 504 => InferenceErrorKind::Timeout,
            500..=599 => InferenceErrorKind::Unavailable,
            _ => InferenceErrorKind::Rejected,
        };
        Self {
            kind,
            http_status: Some(status),
            message: message.into(),
        }
    }
}

/// Port to a vision-capable language model.
///
/// One request bundles the instruction prompt and a single inline image; the
/// reply is the model's free text, which may or may not be pure JSON.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Whether the credential and model needed to reach the provider are present.
    fn is_configured(&self) -> bool;

    async fn infer(
        &self,
        prompt: &ExtractionPrompt,
        image: &EncodedImage,
    ) -> Result<String, InferenceError>;
}
