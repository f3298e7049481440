mod models;

use crate::models::{BaseProvider, Message, RequestSettings, Response};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

pub use models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-5-mini";

/// Client for the OpenAI chat completions endpoint
#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: String,
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Result<Self> {
        if api_key.is_empty() {
            anyhow::bail!("OpenAI API key is empty");
        }
        Ok(OpenAiProvider {
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
        format!("{}/chat/completions", self.base_url)
    }

    pub fn build_request(
        &self,
        messages: &[Message],
        settings: &RequestSettings,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.iter().map(ChatMessage::from).collect(),
            max_completion_tokens: Some(settings.max_tokens),
            temperature: settings.temperature,
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .context("API key is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl BaseProvider for OpenAiProvider {
    async fn sync(&self, messages: &[Message], settings: &RequestSettings) -> Result<Response> {
        let request = self.build_request(messages, settings);
        let endpoint = self.endpoint();

        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&endpoint)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read OpenAI API response body")?;

        if !status.is_success() {
            anyhow::bail!("OpenAI API returned {}: {}", status, body);
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).context("Failed to parse OpenAI API response")?;
        let response = Response::try_from(completion)?;

        tracing::debug!(
            model = %response.model,
            stop_reason = ?response.stop_reason,
            "Received chat completion"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Provider, Role, StopReason};
    use serde_json::json;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::new(
            "sk-test".to_string(),
            DEFAULT_MODEL.to_string(),
            Some("http://localhost:9999/v1/".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        assert_eq!(
            provider().endpoint(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn provider_reports_its_model() {
        let provider = Provider::new(
            crate::models::ProviderType::OpenAi,
            "sk-test".to_string(),
            "gpt-4.1".to_string(),
            None,
        )
        .unwrap();
        assert_eq!(provider.model(), "gpt-4.1");
        assert_eq!(self::provider().model(), DEFAULT_MODEL);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = OpenAiProvider::new(String::new(), DEFAULT_MODEL.to_string(), None);
        assert!(result.is_err());
    }

    #[test]
    fn request_keeps_message_order_and_skips_unset_fields() {
        let messages = vec![
            Message::system("You are a helpful assistant. Special mode: debug."),
            Message::user("hello"),
        ];
        let request = provider().build_request(&messages, &RequestSettings::default());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "gpt-5-mini",
                "messages": [
                    {"role": "system", "content": "You are a helpful assistant. Special mode: debug."},
                    {"role": "user", "content": "hello"}
                ],
                "max_completion_tokens": 1024
            })
        );
    }

    #[test]
    fn response_takes_first_choice() {
        let body = json!({
            "id": "chatcmpl-1",
            "model": "gpt-5-mini",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
        });
        let completion: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        let response = Response::try_from(completion).unwrap();

        assert_eq!(response.role, Role::Assistant);
        assert_eq!(response.content, "Hi there");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.usage.unwrap().output_tokens, 2);
    }

    #[test]
    fn null_content_becomes_empty_text() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": null}, "finish_reason": "length"}
            ]
        });
        let completion: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        let response = Response::try_from(completion).unwrap();

        assert_eq!(response.content, "");
        assert_eq!(response.stop_reason, Some(StopReason::MaxTokens));
    }

    #[test]
    fn empty_choices_is_an_error() {
        let completion: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(Response::try_from(completion).is_err());
    }
}
