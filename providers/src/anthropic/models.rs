use crate::models::{Message, Response, Role, StopReason, Usage};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Roles accepted in the Anthropic `messages` array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum AnthropicRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

impl TryFrom<Role> for AnthropicRole {
    type Error = anyhow::Error;

    fn try_from(role: Role) -> Result<Self, Self::Error> {
        match role {
            Role::User => Ok(AnthropicRole::User),
            Role::Assistant => Ok(AnthropicRole::Assistant),
            Role::System => Err(anyhow::anyhow!(
                "System messages belong in the top-level system field"
            )),
        }
    }
}

impl From<AnthropicRole> for Role {
    fn from(role: AnthropicRole) -> Self {
        match role {
            AnthropicRole::User => Role::User,
            AnthropicRole::Assistant => Role::Assistant,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: String,
}

impl TryFrom<&Message> for AnthropicMessage {
    type Error = anyhow::Error;

    fn try_from(message: &Message) -> Result<Self> {
        Ok(AnthropicMessage {
            role: message.role.try_into()?,
            content: message.content.clone(),
        })
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: Option<String>,
    pub temperature: Option<f64>,
    pub messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum AnthropicResponseContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum AnthropicStopReason {
    #[serde(rename = "end_turn")]
    EndTurn,
    #[serde(rename = "max_tokens")]
    MaxTokens,
    #[serde(rename = "stop_sequence")]
    StopSequence,
    #[serde(other)]
    Other,
}

impl From<AnthropicStopReason> for StopReason {
    fn from(reason: AnthropicStopReason) -> Self {
        match reason {
            AnthropicStopReason::EndTurn => StopReason::EndTurn,
            AnthropicStopReason::MaxTokens => StopReason::MaxTokens,
            AnthropicStopReason::StopSequence => StopReason::StopSequence,
            AnthropicStopReason::Other => StopReason::Other,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicResponse {
    pub id: String,
    pub model: String,
    pub role: AnthropicRole,
    pub content: Vec<AnthropicResponseContentBlock>,
    pub stop_reason: Option<AnthropicStopReason>,
    pub usage: Option<AnthropicUsage>,
}

impl From<AnthropicResponse> for Response {
    fn from(response: AnthropicResponse) -> Self {
        let content = response
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicResponseContentBlock::Text { text } => Some(text),
                AnthropicResponseContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Response {
            id: response.id,
            model: response.model,
            role: response.role.into(),
            content,
            stop_reason: response.stop_reason.map(StopReason::from),
            usage: response.usage.map(|usage| Usage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            }),
        }
    }
}
