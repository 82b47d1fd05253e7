use super::services::{InferenceError, InferenceErrorKind};

/// Stable failure classes surfaced to callers of receipt extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingInput,
    Misconfigured,
    UpstreamError,
    UnparseableResponse,
    InvalidField,
    Cancelled,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingInput => write!(f, "missing_input"),
            ErrorKind::Misconfigured => write!(f, "misconfigured"),
            ErrorKind::UpstreamError => write!(f, "upstream_error"),
            ErrorKind::UnparseableResponse => write!(f, "unparseable_response"),
            ErrorKind::InvalidField => write!(f, "invalid_field"),
            ErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    #[error("receipt.missing_input")]
    MissingInput,
    #[error("receipt.misconfigured")]
    Misconfigured,
    #[error("receipt.rate_limited")]
    RateLimited(#[source] InferenceError),
    #[error("receipt.upstream_error")]
    Upstream(#[source] InferenceError),
    /// Carries the raw model reply for diagnostics.
    #[error("receipt.unparseable_response")]
    UnparseableResponse { raw: String },
    #[error("receipt.invalid_field")]
    InvalidField { field: &'static str, reason: String },
    #[error("receipt.cancelled")]
    Cancelled,
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::MissingInput => ErrorKind::MissingInput,
            ExtractionError::Misconfigured => ErrorKind::Misconfigured,
            ExtractionError::RateLimited(_) | ExtractionError::Upstream(_) => {
                ErrorKind::UpstreamError
            }
            ExtractionError::UnparseableResponse { .. } => ErrorKind::UnparseableResponse,
            ExtractionError::InvalidField { .. } => ErrorKind::InvalidField,
            ExtractionError::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ExtractionError::RateLimited(_))
    }

    /// Message suitable for showing next to the expense form.
    pub fn user_message(&self) -> String {
        match self {
            ExtractionError::MissingInput => "No receipt image was uploaded.".to_string(),
            ExtractionError::Misconfigured => {
                "Receipt scanning is not available right now. Please enter the expense manually."
                    .to_string()
            }
            ExtractionError::RateLimited(_) => {
                "The receipt scanner is busy. Try again shortly.".to_string()
            }
            ExtractionError::Upstream(err) if err.kind == InferenceErrorKind::Unauthorized => {
                "The receipt scanner rejected our credentials. Please enter the expense manually."
                    .to_string()
            }
            ExtractionError::Upstream(_) => {
                "The receipt scanner could not be reached. Try again or enter the expense manually."
                    .to_string()
            }
            ExtractionError::UnparseableResponse { .. } => {
                "The receipt could not be read. Try a sharper photo or enter the expense manually."
                    .to_string()
            }
            ExtractionError::InvalidField { field, .. } => format!(
                "The receipt's {} could not be read. Please fill it in manually.",
                field
            ),
            ExtractionError::Cancelled => {
                "Reading the receipt took too long. Try again.".to_string()
            }
        }
    }
}

impl From<InferenceError> for ExtractionError {
    fn from(err: InferenceError) -> Self {
        match err.kind {
            InferenceErrorKind::NotConfigured => ExtractionError::Misconfigured,
            InferenceErrorKind::RateLimited => ExtractionError::RateLimited(err),
            InferenceErrorKind::Cancelled => ExtractionError::Cancelled,
            _ => ExtractionError::Upstream(err),
        }
    }
}
