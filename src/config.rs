//! Runtime configuration for the assistant.
//!
//! Sources, later ones winning:
//! 1. built-in defaults,
//! 2. a TOML file named by `TARA_CONFIG`,
//! 3. `TARA_KNOWLEDGE`, `TARA_DELAY_MIN_MS`, `TARA_DELAY_MAX_MS`.
//!
//! `knowledge_path` in the file resolves against the file's directory;
//! `TARA_KNOWLEDGE` resolves against the working directory.
//!
//! A `.env` file in the working directory is loaded first, if present.

use crate::conversation::delay::{
    DelayError, RandomDelay, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS,
};
use crate::conversation::session::{DEFAULT_SUGGESTIONS, DEFAULT_SUGGESTION_THRESHOLD};
use crate::conversation::transcript::WELCOME_MESSAGE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid reply delay: {0}")]
    Delay(#[from] DelayError),
    #[error("Environment variable {name} has invalid value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("Welcome message is empty")]
    EmptyWelcome,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Knowledge table to load instead of the built-in one.
    pub knowledge_path: Option<PathBuf>,
    pub welcome: String,
    pub suggestions: Vec<String>,
    /// Suggestions are shown while the transcript has fewer turns than this.
    pub suggestion_threshold: usize,
    pub delay: DelayConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    /// Inclusive lower bound.
    pub min_ms: u64,
    /// Exclusive upper bound.
    pub max_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            knowledge_path: None,
            welcome: WELCOME_MESSAGE.to_string(),
            suggestions: DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            delay: DelayConfig::default(),
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl DelayConfig {
    pub fn strategy(&self) -> Result<RandomDelay, DelayError> {
        RandomDelay::new(self.min_ms, self.max_ms)
    }
}

impl ChatConfig {
    /// Preset with a short delay, for demos and scripted sessions.
    pub fn snappy() -> Self {
        Self {
            delay: DelayConfig {
                min_ms: 50,
                max_ms: 150,
            },
            ..Default::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file. A relative `knowledge_path` in it is taken relative
    /// to the file's own directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&source)?;
        if let (Some(knowledge), Some(dir)) = (config.knowledge_path.as_mut(), path.parent()) {
            if knowledge.is_relative() {
                *knowledge = dir.join(&*knowledge);
            }
        }
        Ok(config)
    }

    /// Defaults, then the `TARA_CONFIG` file, then individual overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }

        let mut config = match std::env::var("TARA_CONFIG") {
            Ok(path) => {
                debug!(%path, "Reading config file");
                Self::from_path(path)?
            }
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `TARA_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(path) = lookup("TARA_KNOWLEDGE") {
            self.knowledge_path = Some(PathBuf::from(path));
        }
        if let Some(ms) = parse_ms(&lookup, "TARA_DELAY_MIN_MS")? {
            self.delay.min_ms = ms;
        }
        if let Some(ms) = parse_ms(&lookup, "TARA_DELAY_MAX_MS")? {
            self.delay.max_ms = ms;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.welcome.trim().is_empty() {
            return Err(ConfigError::EmptyWelcome);
        }
        self.delay.strategy()?;
        Ok(())
    }
}

fn parse_ms<F>(lookup: &F, name: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(ms) => Ok(Some(ms)),
        Err(_) => Err(ConfigError::InvalidEnv { name, value }),
    }
}
