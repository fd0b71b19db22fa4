//! Live adapter for OpenAI-compatible chat completion endpoints.

use reqwest::Client;
use serde::Deserialize;

use crate::error::PromptError;
use crate::ports::completion::{CompleteFuture, Completion, CompletionClient, CompletionRequest};

/// Live completion client that calls an OpenAI-compatible
/// `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiClient {
    /// Create a new client for the given API base URL and key.
    #[must_use]
    pub fn new(api_url: String, api_key: String) -> Self {
        Self { client: Client::new(), api_url, api_key }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> CompleteFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let url = format!("{}/chat/completions", self.api_url);

            // A user turn with an image becomes a two-part content array;
            // text-only turns stay a plain string.
            let user_content = match &request.image_data_url {
                Some(data_url) => serde_json::json!([
                    {"type": "text", "text": request.user_text},
                    {"type": "image_url", "image_url": {"url": data_url}}
                ]),
                None => serde_json::json!(request.user_text),
            };

            let mut body = serde_json::json!({
                "model": request.model,
                "messages": [
                    {"role": "system", "content": request.system},
                    {"role": "user", "content": user_content}
                ],
                "max_tokens": request.max_output_tokens,
            });
            if let Some(temperature) = request.temperature {
                body["temperature"] = serde_json::json!(temperature);
            }

            let response = self
                .client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(PromptError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: ChatResponse = serde_json::from_str(&response_text).map_err(|e| {
                PromptError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            let Some(choice) = parsed.choices.into_iter().next() else {
                let truncated = if response_text.len() > 500 {
                    format!("{}...", &response_text[..500])
                } else {
                    response_text
                };
                return Err(PromptError::Api {
                    status: 200,
                    message: format!("No choices in response. Body: {truncated}"),
                });
            };

            let Some(text) = choice.message.content else {
                return Err(PromptError::Api {
                    status: 200,
                    message: "Choice has no text content".to_string(),
                });
            };

            Ok(Completion { text })
        })
    }
}

// --- OpenAI API response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
