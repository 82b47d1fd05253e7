use std::env;
use std::time::Duration;

use inference::client::{DEFAULT_TIMEOUT_SECS, InferenceProvider};

const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 90;

/// Configuration for the vision model used to read receipts.
///
/// A missing API key does not stop the server: receipt scans then fail with
/// `receipt.misconfigured` while manual expense entry keeps working.
#[derive(Clone)]
pub struct InferenceConfig {
    pub provider: InferenceProvider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Per-request HTTP timeout towards the provider.
    pub request_timeout: Duration,
    /// Deadline for a whole scan, after which the caller gets `receipt.cancelled`.
    pub scan_timeout: Duration,
}

impl InferenceConfig {
    /// Environment variables:
    /// - INFERENCE_PROVIDER: "anthropic" | "gemini" | "openai" (default: "anthropic")
    /// - INFERENCE_API_KEY, or ANTHROPIC_API_KEY / GEMINI_API_KEY / OPENAI_API_KEY
    /// - INFERENCE_MODEL: model name (default depends on provider)
    /// - INFERENCE_BASE_URL: API root (default depends on provider)
    /// - INFERENCE_TIMEOUT_SECS: HTTP timeout (default: 60)
    /// - RECEIPT_SCAN_TIMEOUT_SECS: whole-scan deadline (default: 90)
    pub fn from_env() -> Self {
        let provider = parse_provider(env::var("INFERENCE_PROVIDER").ok());
        let api_key = env::var("INFERENCE_API_KEY")
            .or_else(|_| env::var(provider.api_key_var()))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!(
                %provider,
                "No inference API key configured; receipt scanning is disabled"
            );
        }

        Self {
            provider,
            api_key,
            model: env::var("INFERENCE_MODEL")
                .unwrap_or_else(|_| provider.default_model().to_string()),
            base_url: env::var("INFERENCE_BASE_URL")
                .unwrap_or_else(|_| provider.default_base_url().to_string()),
            request_timeout: parse_secs(
                env::var("INFERENCE_TIMEOUT_SECS").ok(),
                DEFAULT_TIMEOUT_SECS,
            ),
            scan_timeout: parse_secs(
                env::var("RECEIPT_SCAN_TIMEOUT_SECS").ok(),
                DEFAULT_SCAN_TIMEOUT_SECS,
            ),
        }
    }
}

fn parse_provider(raw: Option<String>) -> InferenceProvider {
    match raw {
        None => InferenceProvider::Anthropic,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; falling back to anthropic", e);
            InferenceProvider::Anthropic
        }),
    }
}

fn parse_secs(raw: Option<String>, default: u64) -> Duration {
    let secs = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}
