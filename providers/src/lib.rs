pub mod anthropic;
pub mod models;
pub mod openai;

// Re-export common types and traits from models
pub use models::{
    BaseProvider, Message, Provider, ProviderType, RequestSettings, Response, Role, StopReason,
    Usage,
};

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;
