use async_trait::async_trait;
use serde_json::{Value, json};

use business::domain::receipt::model::EncodedImage;
use business::domain::receipt::prompt::ExtractionPrompt;
use business::domain::receipt::services::{InferenceClient, InferenceError, InferenceErrorKind};

use crate::client::{InferenceHttpClient, empty_reply, read_json, transport_error};

/// Gemini over the Generative Language `generateContent` endpoint.
pub struct GeminiInference {
    client: InferenceHttpClient,
}

impl GeminiInference {
    pub fn new(client: InferenceHttpClient) -> Self {
        Self { client }
    }

    fn reply_text(data: &Value) -> Result<String, InferenceError> {
        if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
            return Err(InferenceError::new(
                InferenceErrorKind::Rejected,
                format!("Prompt blocked: {}", reason),
            ));
        }

        let text: String = data["candidates"]
            .as_array()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate["content"]["parts"].as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(empty_reply());
        }
        Ok(text)
    }
}

#[async_trait]
impl InferenceClient for GeminiInference {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn infer(
        &self,
        prompt: &ExtractionPrompt,
        image: &EncodedImage,
    ) -> Result<String, InferenceError> {
        let (api_key, model) = self.client.credentials()?;

        let body = json!({
            "contents": [{
                "parts": [
                    {"text": prompt.text()},
                    {
                        "inline_data": {
                            "mime_type": image.media_type(),
                            "data": image.data(),
                        }
                    },
                ]
            }]
        });

        tracing::debug!(provider = "gemini", model, "Sending receipt image");

        let response = self
            .client
            .client
            .post(
                self.client
                    .endpoint(&format!("/v1beta/models/{}:generateContent", model)),
            )
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let data: Value = read_json(response).await?;
        Self::reply_text(&data)
    }
}
