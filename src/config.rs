use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    telegram_bot_token: String,
    /// Groq API key for chat completions.
    groq_api_key: String,
    /// Maximum messages kept per user; older turns are dropped first.
    #[serde(default = "default_max_history")]
    max_history: usize,
    /// Short model name -> backend model identifier.
    #[serde(default = "default_models")]
    models: HashMap<String, String>,
    /// Which entry of `models` to use. Must be a key of the table.
    #[serde(default = "default_current_model")]
    current_model: String,
    /// Directory for state files (logs). Defaults to current directory.
    data_dir: Option<String>,
}

fn default_max_history() -> usize {
    10
}

fn default_models() -> HashMap<String, String> {
    HashMap::from([
        ("llama".to_string(), "llama-3.3-70b-versatile".to_string()),
        ("gemma".to_string(), "gemma2-9b-it".to_string()),
    ])
}

fn default_current_model() -> String {
    "llama".to_string()
}

pub struct Config {
    pub telegram_bot_token: String,
    pub groq_api_key: String,
    pub max_history: usize,
    /// Short name of the selected model (for display).
    pub current_model: String,
    /// Backend model identifier resolved from the model table at load time,
    /// so a missing mapping can never reach the router.
    pub model_id: String,
    /// Directory for state files (logs).
    pub data_dir: PathBuf,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        // Validate required fields
        if file.telegram_bot_token.is_empty() {
            return Err(ConfigError::Validation("telegram_bot_token is required".into()));
        }
        // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
        let token_parts: Vec<&str> = file.telegram_bot_token.split(':').collect();
        if token_parts.len() != 2 || token_parts[0].parse::<u64>().is_err() || token_parts[1].is_empty() {
            return Err(ConfigError::Validation(
                "telegram_bot_token appears invalid (expected format: 123456789:ABCdefGHI...)".into()
            ));
        }
        if file.groq_api_key.is_empty() {
            return Err(ConfigError::Validation("groq_api_key is required".into()));
        }
        if file.max_history == 0 {
            return Err(ConfigError::Validation("max_history must be at least 1".into()));
        }

        let model_id = file
            .models
            .get(&file.current_model)
            .cloned()
            .ok_or_else(|| {
                let mut known: Vec<&str> = file.models.keys().map(String::as_str).collect();
                known.sort_unstable();
                ConfigError::Validation(format!(
                    "current_model '{}' is not in the models table (known: {})",
                    file.current_model,
                    known.join(", ")
                ))
            })?;

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            telegram_bot_token: file.telegram_bot_token,
            groq_api_key: file.groq_api_key,
            max_history: file.max_history,
            current_model: file.current_model,
            model_id,
            data_dir,
        })
    }
}
