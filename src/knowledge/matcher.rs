//! Picks the single best entry for a query.

use super::base::KnowledgeBase;
use super::scorer::final_score;
use crate::preprocessing::Cleaner;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Position of the winning entry in the table.
    pub index: usize,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct ResponseMatcher {
    base: Arc<KnowledgeBase>,
}

impl ResponseMatcher {
    pub fn new(base: Arc<KnowledgeBase>) -> Self {
        Self { base }
    }

    /// Matcher over the process-wide table.
    pub fn global() -> Self {
        Self::new(super::base::global())
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.base
    }

    /// Highest scoring entry, if any scored above zero. Earlier entries win ties.
    pub fn best_match(&self, query: &str) -> Option<Match> {
        let normalized = Cleaner::normalize_query(query);
        let mut best: Option<Match> = None;
        let mut max_score = 0.0_f32;

        for (index, entry) in self.base.entries().iter().enumerate() {
            let score = final_score(entry, &normalized);
            if score > max_score {
                max_score = score;
                best = Some(Match { index, score });
            }
        }

        best
    }

    /// Canned response for `query`, or the fallback. Never fails.
    pub fn select_response(&self, query: &str) -> &str {
        match self.best_match(query) {
            Some(m) => {
                debug!(entry = m.index, score = m.score, "Knowledge entry matched");
                &self.base.entries()[m.index].response
            }
            None => {
                debug!("No knowledge entry matched, using fallback");
                self.base.fallback()
            }
        }
    }
}
