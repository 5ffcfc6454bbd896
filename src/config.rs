use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    #[serde(default)]
    pub prompt: PromptConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    /// JSON profile to load instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: PromptConfig::default(),
            ai: AiConfig::default(),
            navigation: NavigationConfig::default(),
            theme: ThemeConfig::default(),
            profile_path: None,
        }
    }
}

/// Shell prompt configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptConfig {
    /// Host part of `user@host:~`
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_host() -> String {
    "portfolio".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
        }
    }
}

/// Settings for the `/ask` completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AiConfig {
    /// Base URL of an OpenAI-compatible API; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the bearer token
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Client-side request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Number of earlier question/answer pairs replayed with each request
    #[serde(default)]
    pub history_turns: usize,
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    800
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            history_turns: 0,
        }
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Blank values count as missing.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

/// Delays and routes for the shell's navigation effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NavigationConfig {
    #[serde(default = "default_portfolio_route")]
    pub portfolio_route: String,

    #[serde(default = "default_portfolio_delay_ms")]
    pub portfolio_delay_ms: u64,

    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: u64,
}

fn default_portfolio_route() -> String {
    "/portfolio".to_string()
}

fn default_portfolio_delay_ms() -> u64 {
    1500
}

fn default_reset_delay_ms() -> u64 {
    1000
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            portfolio_route: default_portfolio_route(),
            portfolio_delay_ms: default_portfolio_delay_ms(),
            reset_delay_ms: default_reset_delay_ms(),
        }
    }
}

impl NavigationConfig {
    pub fn portfolio_delay(&self) -> Duration {
        Duration::from_millis(self.portfolio_delay_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

/// Terminal colors, by name (`"Green"`, `"DarkGray"`, ...) or `[r, g, b]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeConfig {
    /// Disable colors entirely
    #[serde(default)]
    pub plain: bool,

    #[serde(default = "default_prompt_color")]
    pub prompt: ColorSpec,

    #[serde(default = "default_error_color")]
    pub error: ColorSpec,

    /// Headings such as `AI Response:`
    #[serde(default = "default_accent_color")]
    pub accent: ColorSpec,

    #[serde(default = "default_muted_color")]
    pub muted: ColorSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    Rgb(u8, u8, u8),
    Named(String),
}

fn default_prompt_color() -> ColorSpec {
    ColorSpec::Named("Green".to_string())
}

fn default_error_color() -> ColorSpec {
    ColorSpec::Named("Red".to_string())
}

fn default_accent_color() -> ColorSpec {
    ColorSpec::Named("Cyan".to_string())
}

fn default_muted_color() -> ColorSpec {
    ColorSpec::Named("DarkGray".to_string())
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            plain: false,
            prompt: default_prompt_color(),
            error: default_error_color(),
            accent: default_accent_color(),
            muted: default_muted_color(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// JSON Schema describing the config file
    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prompt.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "prompt.host cannot be empty".to_string(),
            ));
        }

        if self.ai.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ai.base_url cannot be empty".to_string(),
            ));
        }

        if self.ai.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ai.model cannot be empty".to_string(),
            ));
        }

        if self.ai.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "ai.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
