//! Configuration loading for the agent recommender.
//!
//! Layered config: defaults -> user config file -> explicit config file ->
//! env vars -> CLI flags (applied by the caller).
//! The user config file lives at ~/.config/agent-recommend/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Text analysis options shared by document and query processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Drop common English words before weighting
    #[serde(default = "default_true")]
    pub remove_stop_words: bool,

    /// Apply light suffix stemming (plural, -ing, -er, -ed)
    #[serde(default = "default_true")]
    pub stem: bool,

    /// Tokens shorter than this many characters are discarded
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

fn default_true() -> bool {
    true
}

fn default_min_token_len() -> usize {
    2
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            remove_stop_words: default_true(),
            stem: default_true(),
            min_token_len: default_min_token_len(),
        }
    }
}

/// Recommendation behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderSettings {
    /// Number of suggestions when the caller does not ask for a specific k
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Minimum score advantage before suggesting a different agent.
    /// Range: 0.0-1.0.
    #[serde(default = "default_switch_threshold")]
    pub switch_threshold: f32,

    /// Tokenizer options
    #[serde(default)]
    pub analyzer: AnalyzerSettings,
}

fn default_top_k() -> usize {
    3
}

fn default_switch_threshold() -> f32 {
    0.15
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            switch_threshold: default_switch_threshold(),
            analyzer: AnalyzerSettings::default(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// JSON file holding the agent catalog, for collaborators that read one
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Recommender configuration
    #[serde(default)]
    pub recommender: RecommenderSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            catalog_path: None,
            recommender: RecommenderSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/agent-recommend/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (AGENT_RECOMMEND_*, nested keys split by `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, ConfigError> {
        let default_config_path = default_config_dir().join("config");

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // AGENT_RECOMMEND_LOG_LEVEL, AGENT_RECOMMEND_RECOMMENDER__DEFAULT_TOP_K, ...
        builder = builder.add_source(
            Environment::with_prefix("AGENT_RECOMMEND")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rec = &self.recommender;
        if rec.default_top_k == 0 {
            return Err(ConfigError::Invalid(
                "recommender.default_top_k must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&rec.switch_threshold) {
            return Err(ConfigError::Invalid(format!(
                "recommender.switch_threshold must be 0.0-1.0, got {}",
                rec.switch_threshold
            )));
        }
        if rec.analyzer.min_token_len == 0 {
            return Err(ConfigError::Invalid(
                "recommender.analyzer.min_token_len must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_config_dir() -> PathBuf {
    ProjectDirs::from("", "", "agent-recommend")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
