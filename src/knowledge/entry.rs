//! Knowledge entries: trigger keywords plus a canned, pre-formatted answer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Lowercase trigger strings, de-duplicated on load.
    pub keywords: Vec<String>,
    /// Returned verbatim when the entry wins. May contain `**bold**` and newlines.
    pub response: String,
    /// Multiplier applied to the raw score.
    #[serde(default = "default_weight")]
    pub weight: f32,
}

fn default_weight() -> f32 {
    1.0
}

impl KnowledgeEntry {
    pub fn new<K, S>(keywords: K, response: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            response: response.into(),
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Lowercases and de-duplicates the keyword set, keeping first occurrence order.
    pub(crate) fn normalize(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(self.keywords.len());
        for key in self.keywords.drain(..) {
            let key = key.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
            }
        }
        self.keywords = seen;
    }
}
