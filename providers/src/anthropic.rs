mod models;

use crate::models::{BaseProvider, Message, RequestSettings, Response, Role};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

pub use models::{AnthropicMessage, AnthropicRequest, AnthropicResponse};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";

#[derive(Clone)]
pub struct AnthropicProvider {
    api_key: String,
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Result<Self> {
        if api_key.is_empty() {
            anyhow::bail!("Anthropic API key is empty");
        }
        Ok(AnthropicProvider {
            api_key,
            client: reqwest::Client::new(),
            model,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }

    /// System entries are joined into the top-level `system` field; the rest keep their order.
    pub fn build_request(
        &self,
        messages: &[Message],
        settings: &RequestSettings,
    ) -> Result<AnthropicRequest> {
        let (system, conversation): (Vec<&Message>, Vec<&Message>) = messages
            .iter()
            .partition(|message| message.role == Role::System);

        let system = (!system.is_empty()).then(|| {
            system
                .iter()
                .map(|message| message.content.as_str())
                .collect::<Vec<_>>()
                .join("\n\n")
        });

        let messages = conversation
            .into_iter()
            .map(AnthropicMessage::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(AnthropicRequest {
            model: self.model.clone(),
            max_tokens: settings.max_tokens,
            system,
            temperature: settings.temperature,
            messages,
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.api_key).context("API key is not a valid header value")?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl BaseProvider for AnthropicProvider {
    async fn sync(&self, messages: &[Message], settings: &RequestSettings) -> Result<Response> {
        let request = self.build_request(messages, settings)?;

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Sending messages request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Anthropic API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Anthropic API response body")?;

        if !status.is_success() {
            anyhow::bail!("Anthropic API returned {}: {}", status, body);
        }

        let response: AnthropicResponse =
            serde_json::from_str(&body).context("Failed to parse Anthropic API response")?;

        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StopReason;
    use serde_json::json;

    fn provider() -> AnthropicProvider {
        AnthropicProvider::new("key".to_string(), DEFAULT_MODEL.to_string(), None).unwrap()
    }

    #[test]
    fn system_messages_are_lifted_out_of_the_conversation() {
        let messages = vec![
            Message::system("You are a helpful assistant. Special mode: debug."),
            Message::user("hello"),
            Message::assistant("hi"),
            Message::user("again"),
        ];
        let request = provider()
            .build_request(&messages, &RequestSettings::default())
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["system"],
            "You are a helpful assistant. Special mode: debug."
        );
        assert_eq!(
            body["messages"],
            json!([
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"},
                {"role": "user", "content": "again"}
            ])
        );
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn text_blocks_are_concatenated() {
        let body = json!({
            "id": "msg_1",
            "type": "message",
            "model": DEFAULT_MODEL,
            "role": "assistant",
            "content": [
                {"type": "text", "text": "Hello"},
                {"type": "thinking", "thinking": "hmm"},
                {"type": "text", "text": " world"}
            ],
            "stop_reason": "end_turn",
            "stop_sequence": null,
            "usage": {"input_tokens": 3, "output_tokens": 2}
        });
        let response: Response = serde_json::from_value::<AnthropicResponse>(body)
            .unwrap()
            .into();

        assert_eq!(response.content, "Hello world");
        assert_eq!(response.role, Role::Assistant);
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn provider_reports_its_model() {
        assert_eq!(provider().model(), DEFAULT_MODEL);
    }

    #[test]
    fn endpoint_uses_default_base_url() {
        assert_eq!(
            provider().endpoint(),
            "https://api.anthropic.com/v1/messages"
        );
    }
}
