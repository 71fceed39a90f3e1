use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO) or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Outbound request quota
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Batch queue pacing
    #[serde(default)]
    pub batch: BatchConfig,

    /// Translation memory behavior
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Maximum history entries kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Maximum recent languages kept
    #[serde(default = "default_recent_languages_limit")]
    pub recent_languages_limit: usize,

    /// Input longer than this many characters is truncated
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// SQLite file holding persisted state; platform data dir when unset
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation endpoint configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EndpointConfig {
    /// Service URL
    #[serde(default = "default_endpoint_url")]
    pub url: String,

    /// Client identifier sent as the `client` query parameter
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            client_id: default_client_id(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EndpointConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Fixed-window request quota
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RateLimitConfig {
    /// Requests permitted per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Batch queue settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchConfig {
    /// Delay in milliseconds applied after every processed item
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_batch_delay_ms(),
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Translation memory and glossary settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MemoryConfig {
    /// Maximum memory entries kept
    #[serde(default = "default_memory_max_entries")]
    pub max_entries: usize,

    /// Answer from an exact memory hit instead of calling the endpoint
    #[serde(default)]
    pub reuse_translations: bool,

    /// Apply the glossary to every fresh translation
    #[serde(default = "default_true")]
    pub apply_glossary: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_memory_max_entries(),
            reuse_translations: false,
            apply_glossary: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_endpoint_url() -> String {
    "https://translate.googleapis.com/translate_a/single".to_string()
}

fn default_client_id() -> String {
    "gtx".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_requests() -> u32 {
    30
}

fn default_window_secs() -> u64 {
    60
}

fn default_batch_delay_ms() -> u64 {
    500 // stays under the endpoint's abuse thresholds
}

fn default_memory_max_entries() -> usize {
    500
}

fn default_history_limit() -> usize {
    100
}

fn default_recent_languages_limit() -> usize {
    5
}

fn default_max_input_chars() -> usize {
    5000
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.source_language != "auto" {
            crate::language_utils::get_language_name(&self.source_language)?;
        }
        if self.target_language == "auto" {
            return Err(anyhow!("Target language cannot be 'auto'"));
        }
        crate::language_utils::get_language_name(&self.target_language)?;

        if self.endpoint.url.trim().is_empty() {
            return Err(anyhow!("Translation endpoint URL is required"));
        }
        url::Url::parse(&self.endpoint.url)
            .map_err(|e| anyhow!("Invalid endpoint URL '{}': {}", self.endpoint.url, e))?;

        if self.rate_limit.max_requests == 0 {
            return Err(anyhow!("rate_limit.max_requests must be at least 1"));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(anyhow!("rate_limit.window_secs must be at least 1"));
        }
        if self.memory.max_entries == 0 {
            return Err(anyhow!("memory.max_entries must be at least 1"));
        }
        if self.max_input_chars == 0 {
            return Err(anyhow!("max_input_chars must be at least 1"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            endpoint: EndpointConfig::default(),
            rate_limit: RateLimitConfig::default(),
            batch: BatchConfig::default(),
            memory: MemoryConfig::default(),
            history_limit: default_history_limit(),
            recent_languages_limit: default_recent_languages_limit(),
            max_input_chars: default_max_input_chars(),
            storage_path: None,
            log_level: LogLevel::default(),
        }
    }
}
