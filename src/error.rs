//! Crate-level error type.
//!
//! Answering questions never fails; these errors only come from startup
//! (configuration and knowledge loading) and the terminal host's I/O.

use thiserror::Error;

use crate::config::ConfigError;
use crate::knowledge::KnowledgeError;

#[derive(Error, Debug)]
pub enum TaraError {
    #[error("Configuration failed: {0}")]
    Config(#[from] ConfigError),
    #[error("Knowledge table failed: {0}")]
    Knowledge(#[from] KnowledgeError),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize transcript: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type TaraResult<T> = Result<T, TaraError>;
