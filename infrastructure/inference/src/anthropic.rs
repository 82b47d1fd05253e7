use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use business::domain::receipt::model::EncodedImage;
use business::domain::receipt::prompt::ExtractionPrompt;
use business::domain::receipt::services::{InferenceClient, InferenceError};

use crate::client::{InferenceHttpClient, empty_reply, read_json, transport_error};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

/// Claude over the Anthropic Messages API.
pub struct AnthropicInference {
    client: InferenceHttpClient,
}

impl AnthropicInference {
    pub fn new(client: InferenceHttpClient) -> Self {
        Self { client }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: String },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ReplyBlock>,
}

#[derive(Deserialize)]
struct ReplyBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[async_trait]
impl InferenceClient for AnthropicInference {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn infer(
        &self,
        prompt: &ExtractionPrompt,
        image: &EncodedImage,
    ) -> Result<String, InferenceError> {
        let (api_key, model) = self.client.credentials()?;

        let body = MessagesRequest {
            model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: image.media_type(),
                            data: image.data(),
                        },
                    },
                    ContentBlock::Text {
                        text: prompt.text(),
                    },
                ],
            }],
        };

        tracing::debug!(provider = "anthropic", model, "Sending receipt image");

        let response = self
            .client
            .client
            .post(self.client.endpoint("/v1/messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let reply: MessagesResponse = read_json(response).await?;

        reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(empty_reply)
    }
}
