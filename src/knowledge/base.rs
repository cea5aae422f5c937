//! The knowledge table: built-in content, TOML loading, and the process-wide instance.

use super::entry::KnowledgeEntry;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge table has no entries")]
    EmptyTable,
    #[error("Entry {0} has no keywords")]
    NoKeywords(usize),
    #[error("Entry {0} has an empty keyword")]
    EmptyKeyword(usize),
    #[error("Entry {0} has an empty response")]
    EmptyResponse(usize),
    #[error("Entry {index} has invalid weight {weight}; must be finite and > 0")]
    InvalidWeight { index: usize, weight: f32 },
    #[error("Fallback response is empty")]
    EmptyFallback,
    #[error("Failed to read knowledge file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse knowledge file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Knowledge table already installed")]
    AlreadyInstalled,
}

pub const FALLBACK_RESPONSE: &str = "I can explain SASTRAISM, the TARA/SARA platforms, our TRL-6 readiness, or the technical stack (DeepSeek/Whisper). How may I assist?";

const BUILTIN: &[(&[&str], &str)] = &[
    (
        &["sastra", "samudra", "mathanam", "what is", "overview"],
        "**SASTRA AI Samudra Mathanam** is an institutional AI Foundry funded by the TCS Foundation. It unifies teaching, assessment, and real-time intelligence into a single TRL-6+ platform to solve classroom engagement challenges.",
    ),
    (
        &["problem", "engagement", "issue", "attention"],
        "The core problem is the **engagement crisis**. Students struggle to pay attention during lengthy lectures due to digital distractions. Sastra AI solves this by turning passive listening into active involvement via real-time interventions.",
    ),
    (
        &["solution", "modules", "components"],
        "Sastra AI consists of two modules:\n\n1. **SARA (Smart AI-Enabled Real-time Assistant):** For live transcription and interaction.\n2. **TARA (Teaching & AI-Assessment Reasoning Assistant):** For deep reasoning and complex assessment generation.",
    ),
    (
        &["tech", "stack", "gpu", "whisper", "deepseek", "architecture"],
        "**Technical Architecture:**\n• **Compute:** SASTRA's DGX HPC cluster & H200 GPUs.\n• **Models:** Whisper AI (Speech) & DeepSeek/Mistral (Reasoning).\n• **Backend:** Python Flask & Node.js.\n• **Novelty:** Dual-Source Intelligence (Live Audio + PDF Context).",
    ),
    (
        &["tara", "module 2"],
        "**TARA (Module 2)** is the reasoning engine. It integrates locally deployed LLMs (**DeepSeek**) to create concept-rich MCQs. It analyzes student performance to automatically adjust difficulty and provides detailed reasoning.",
    ),
    (
        &["trl", "readiness"],
        "We are at **Technology Readiness Level (TRL) 6**. The system is a fully functional prototype successfully validated in real classroom environments at SASTRA.",
    ),
    (
        &["impact", "benefit", "time"],
        "**Impact Metrics:**\n• **Efficiency:** Assessment creation time reduced by 70–80%.\n• **Engagement:** Targeted 40% increase in participation.\n• **Scale:** Built for 100+ faculty and 8,000+ students.",
    ),
];

/// Immutable, ordered knowledge table plus its fallback answer.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    fallback: String,
}

#[derive(Deserialize)]
struct KnowledgeFile {
    #[serde(default)]
    fallback: Option<String>,
    #[serde(default)]
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Validates and normalizes `entries`. Table order is preserved; it decides ties.
    pub fn new(
        entries: Vec<KnowledgeEntry>,
        fallback: impl Into<String>,
    ) -> Result<Self, KnowledgeError> {
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(KnowledgeError::EmptyFallback);
        }
        if entries.is_empty() {
            return Err(KnowledgeError::EmptyTable);
        }

        let mut entries = entries;
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.normalize();
            if entry.keywords.is_empty() {
                return Err(KnowledgeError::NoKeywords(index));
            }
            if entry.keywords.iter().any(|k| k.is_empty()) {
                return Err(KnowledgeError::EmptyKeyword(index));
            }
            if entry.response.trim().is_empty() {
                return Err(KnowledgeError::EmptyResponse(index));
            }
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(KnowledgeError::InvalidWeight {
                    index,
                    weight: entry.weight,
                });
            }
        }

        Ok(Self { entries, fallback })
    }

    /// The TARA widget's own table.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(keys, response)| KnowledgeEntry::new(keys.iter().copied(), *response))
            .collect();
        Self {
            entries,
            fallback: FALLBACK_RESPONSE.to_string(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, KnowledgeError> {
        let file: KnowledgeFile = toml::from_str(source)?;
        let fallback = file
            .fallback
            .unwrap_or_else(|| FALLBACK_RESPONSE.to_string());
        Self::new(file.entries, fallback)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, KnowledgeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let base = Self::from_toml_str(&source)?;
        info!(path = %path.display(), entries = base.len(), "Loaded knowledge table");
        Ok(base)
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: OnceLock<Arc<KnowledgeBase>> = OnceLock::new();

/// Installs the process-wide table. Must happen before the first `global()` call.
pub fn install(base: KnowledgeBase) -> Result<(), KnowledgeError> {
    GLOBAL
        .set(Arc::new(base))
        .map_err(|_| KnowledgeError::AlreadyInstalled)
}

/// The process-wide table; falls back to the built-in one if nothing was installed.
pub fn global() -> Arc<KnowledgeBase> {
    GLOBAL
        .get_or_init(|| {
            debug!("No knowledge table installed, using built-in");
            Arc::new(KnowledgeBase::builtin())
        })
        .clone()
}
