mod error;
mod models;

pub use error::ConfigError;
pub use models::Config;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "chatgraph.yml";

/// Locations searched in order: the current working directory, then ~/.config/chatgraph/
pub fn candidate_paths() -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = vec![env::current_dir()?.join(CONFIG_FILE_NAME)];
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(
            home_dir
                .join(".config")
                .join("chatgraph")
                .join(CONFIG_FILE_NAME),
        );
    }
    Ok(paths)
}

/// Parses a single config file
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Loads the first existing file among `paths`
pub fn load_config_from_paths(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let path = paths
        .iter()
        .find(|path| path.exists())
        .ok_or(ConfigError::NotFound)?;
    load_config_from(path)
}

/// Attempts to load the configuration from a file.
/// First checks the current working directory, then falls back to ~/.config/chatgraph/chatgraph.yml
pub fn load_config_file() -> Result<Config, ConfigError> {
    load_config_from_paths(&candidate_paths()?)
}

/// Like [`load_config_file`], but a missing file yields the defaults
pub fn load_config() -> Result<Config, ConfigError> {
    match load_config_file() {
        Err(ConfigError::NotFound) => {
            tracing::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent::GraphKind;
    use providers::{Provider, ProviderType};
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn minimal_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "provider: openai\n");
        let config = load_config_from(&path).unwrap();

        assert_eq!(config.provider, ProviderType::OpenAi);
        assert_eq!(config.model(), "gpt-5-mini");
        assert_eq!(config.response_max_tokens, 1024);
        assert_eq!(config.graph, GraphKind::NumberRouted);
        assert_eq!(config.context(), agent::Context::default());
    }

    #[test]
    fn full_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "provider: anthropic\n\
             provider_base_url: http://127.0.0.1:8080\n\
             model: claude-3-7-sonnet-20250219\n\
             response_max_tokens: 256\n\
             temperature: 0.2\n\
             graph: chatbot\n\
             mode: debug\n\
             suffix: \" ~bot\"\n",
        );
        let config = load_config_from(&path).unwrap();

        assert_eq!(config.provider, ProviderType::Anthropic);
        assert_eq!(config.graph_settings().kind, GraphKind::Chatbot);
        assert_eq!(config.graph_settings().request.max_tokens, 256);
        assert_eq!(config.graph_settings().request.temperature, Some(0.2));
        assert_eq!(config.context().mode.as_deref(), Some("debug"));
        assert_eq!(config.context().suffix(), " ~bot");
    }

    #[test]
    fn first_existing_path_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let missing = first.path().join("absent.yml");
        let present = write_config(&second, "graph: chatbot\n");

        let config = load_config_from_paths(&[missing, present]).unwrap();
        assert_eq!(config.graph, GraphKind::Chatbot);
    }

    #[test]
    fn no_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from_paths(&[dir.path().join(CONFIG_FILE_NAME)]);
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "graph: [not, a, kind]\n");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn api_key_prefers_file_then_environment() {
        let mut config = Config::default();
        let from_env = config
            .resolve_api_key_with(|name| (name == "OPENAI_API_KEY").then(|| "env-key".to_string()))
            .unwrap();
        assert_eq!(from_env, "env-key");

        config.api_key = Some("file-key".to_string());
        let from_file = config
            .resolve_api_key_with(|_| Some("env-key".to_string()))
            .unwrap();
        assert_eq!(from_file, "file-key");
    }

    #[test]
    fn missing_api_key_names_the_variable() {
        let config = Config {
            provider: ProviderType::Anthropic,
            ..Config::default()
        };
        let err = config.resolve_api_key_with(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey("ANTHROPIC_API_KEY")));
    }

    #[test]
    fn configured_key_builds_the_anthropic_provider() {
        let config = Config {
            provider: ProviderType::Anthropic,
            api_key: Some("file-key".to_string()),
            ..Config::default()
        };
        let provider = Provider::try_from(&config);

        assert!(matches!(provider, Ok(Provider::Anthropic(_))));
        if let Ok(provider) = provider {
            assert_eq!(provider.provider_type(), ProviderType::Anthropic);
            assert_eq!(provider.model(), "claude-3-7-sonnet-20250219");
        }
    }

    #[test]
    fn missing_key_fails_provider_construction() {
        let config = Config::default();
        let provider = config.provider_with(|_| None);
        assert!(matches!(
            provider,
            Err(ConfigError::MissingApiKey("OPENAI_API_KEY"))
        ));
    }
}
