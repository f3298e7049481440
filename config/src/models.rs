use crate::error::ConfigError;
use agent::{Context, GraphKind, GraphSettings};
use providers::{Provider, ProviderType, RequestSettings};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderType,
    pub provider_base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    #[serde(default = "default_response_max_tokens")]
    pub response_max_tokens: u32,
    pub temperature: Option<f64>,
    #[serde(default)]
    pub graph: GraphKind,
    pub mode: Option<String>,
    pub suffix: Option<String>,
}

fn default_response_max_tokens() -> u32 {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderType::default(),
            provider_base_url: None,
            api_key: None,
            model: None,
            response_max_tokens: default_response_max_tokens(),
            temperature: None,
            graph: GraphKind::default(),
            mode: None,
            suffix: None,
        }
    }
}

impl Config {
    /// Configured model, or the provider's default
    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn graph_settings(&self) -> GraphSettings {
        GraphSettings {
            kind: self.graph,
            request: RequestSettings {
                max_tokens: self.response_max_tokens,
                temperature: self.temperature,
            },
        }
    }

    /// Default invocation context; callers may still override it per invocation
    pub fn context(&self) -> Context {
        Context {
            mode: self.mode.clone(),
            suffix: self.suffix.clone(),
        }
    }

    /// The file's `api_key` wins; otherwise the provider's environment variable is consulted
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_var = self.provider.api_key_env();
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(env_var).filter(|key| !key.is_empty()))
            .ok_or(ConfigError::MissingApiKey(env_var))
    }

    /// Builds the configured provider, looking the API key up through `lookup`
    pub fn provider_with<F>(&self, lookup: F) -> Result<Provider, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Provider::new(
            self.provider,
            self.resolve_api_key_with(lookup)?,
            self.model(),
            self.provider_base_url.clone(),
        )
        .map_err(ConfigError::Provider)
    }
}

impl TryFrom<&Config> for Provider {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        config.provider_with(|name| std::env::var(name).ok())
    }
}
