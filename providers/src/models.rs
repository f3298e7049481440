use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents the role of the message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single entry of the conversation history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Message {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<Response> for Message {
    fn from(response: Response) -> Self {
        Message {
            role: response.role,
            content: response.content,
        }
    }
}

/// Per-request generation knobs
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSettings {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for RequestSettings {
    fn default() -> Self {
        RequestSettings {
            max_tokens: 1024,
            temperature: None,
        }
    }
}

/// Represents the reason why the LLM stopped generating text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StopReason {
    #[serde(rename = "end_turn")]
    EndTurn,
    #[serde(rename = "max_tokens")]
    MaxTokens,
    #[serde(rename = "stop_sequence")]
    StopSequence,
    #[serde(rename = "other")]
    Other,
}

/// Represents usage statistics for the API request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// A provider-neutral completion: one assistant message plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub model: String,
    pub role: Role,
    pub content: String,
    pub stop_reason: Option<StopReason>,
    pub usage: Option<Usage>,
}

impl Response {
    /// Builds a plain assistant reply, mostly useful for stand-in providers
    pub fn assistant_text(model: impl Into<String>, content: impl Into<String>) -> Self {
        Response {
            id: String::new(),
            model: model.into(),
            role: Role::Assistant,
            content: content.into(),
            stop_reason: Some(StopReason::EndTurn),
            usage: None,
        }
    }
}

/// A trait for LLM providers
pub trait BaseProvider {
    /// Send the ordered message history and get a single assistant reply back
    fn sync(
        &self,
        messages: &[Message],
        settings: &RequestSettings,
    ) -> impl std::future::Future<Output = Result<Response>> + Send;
}

/// The hosted APIs a [`Provider`] can talk to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    OpenAi,
    Anthropic,
}

impl ProviderType {
    /// Environment variable holding the API key for this provider
    pub fn api_key_env(&self) -> &'static str {
        match self {
            ProviderType::OpenAi => "OPENAI_API_KEY",
            ProviderType::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderType::OpenAi => crate::openai::DEFAULT_MODEL,
            ProviderType::Anthropic => crate::anthropic::DEFAULT_MODEL,
        }
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::OpenAi => write!(f, "openai"),
            ProviderType::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderType::OpenAi),
            "anthropic" => Ok(ProviderType::Anthropic),
            other => Err(anyhow::anyhow!("Unknown provider: {}", other)),
        }
    }
}

/// A provider factory that creates and manages specific LLM provider implementations
#[derive(Clone)]
pub enum Provider {
    OpenAi(crate::openai::OpenAiProvider),
    Anthropic(crate::anthropic::AnthropicProvider),
}

impl Provider {
    pub fn new(
        provider_type: ProviderType,
        api_key: String,
        model: String,
        base_url: Option<String>,
    ) -> Result<Self> {
        match provider_type {
            ProviderType::OpenAi => Ok(Provider::OpenAi(crate::openai::OpenAiProvider::new(
                api_key, model, base_url,
            )?)),
            ProviderType::Anthropic => Ok(Provider::Anthropic(
                crate::anthropic::AnthropicProvider::new(api_key, model, base_url)?,
            )),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi(provider) => provider.model(),
            Provider::Anthropic(provider) => provider.model(),
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::OpenAi(_) => ProviderType::OpenAi,
            Provider::Anthropic(_) => ProviderType::Anthropic,
        }
    }
}

impl BaseProvider for Provider {
    async fn sync(&self, messages: &[Message], settings: &RequestSettings) -> Result<Response> {
        match self {
            Provider::OpenAi(provider) => provider.sync(messages, settings).await,
            Provider::Anthropic(provider) => provider.sync(messages, settings).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let message = Message::assistant("hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));

        let parsed: Message =
            serde_json::from_str(r#"{"role": "system", "content": "be brief"}"#).unwrap();
        assert_eq!(parsed, Message::system("be brief"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let parsed = serde_json::from_str::<Message>(r#"{"role": "tool", "content": "x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn response_converts_to_message_with_its_role() {
        let message: Message = Response::assistant_text("m", "hello").into();
        assert_eq!(message, Message::assistant("hello"));
    }

    #[test]
    fn provider_type_parses_case_insensitively() {
        assert_eq!("OpenAI".parse::<ProviderType>().unwrap(), ProviderType::OpenAi);
        assert_eq!(
            "anthropic".parse::<ProviderType>().unwrap(),
            ProviderType::Anthropic
        );
        assert!("gemini".parse::<ProviderType>().is_err());
        assert_eq!(ProviderType::Anthropic.api_key_env(), "ANTHROPIC_API_KEY");
    }
}
