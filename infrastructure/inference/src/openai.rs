use async_trait::async_trait;
use serde_json::{Value, json};

use business::domain::receipt::model::EncodedImage;
use business::domain::receipt::prompt::ExtractionPrompt;
use business::domain::receipt::services::{InferenceClient, InferenceError};

use crate::client::{InferenceHttpClient, empty_reply, read_json, transport_error};

/// GPT vision models over the OpenAI Responses API.
pub struct OpenAIInference {
    client: InferenceHttpClient,
}

impl OpenAIInference {
    pub fn new(client: InferenceHttpClient) -> Self {
        Self { client }
    }

    fn output_text(data: &Value) -> Option<String> {
        data["output"]
            .as_array()
            .and_then(|outputs| outputs.iter().find(|o| o["type"] == "message"))
            .and_then(|msg| msg["content"].as_array())
            .and_then(|contents| contents.iter().find(|c| c["type"] == "output_text"))
            .and_then(|c| c["text"].as_str())
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    }
}

#[async_trait]
impl InferenceClient for OpenAIInference {
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
            "model": model,
            "input": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "input_image",
                            "image_url": image.to_data_url(),
                            "detail": "high",
                        },
                        {
                            "type": "input_text",
                            "text": prompt.text(),
                        },
                    ],
                },
            ],
            "temperature": 0.1,
        });

        tracing::debug!(provider = "openai", model, "Sending receipt image");

        let response = self
            .client
            .client
            .post(self.client.endpoint("/v1/responses"))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let data: Value = read_json(response).await?;
        Self::output_text(&data).ok_or_else(empty_reply)
    }
}
