//! Additive keyword scoring.

use super::entry::KnowledgeEntry;

/// Points for a keyword found anywhere in the query.
pub const CONTAINS_POINTS: u32 = 1;
/// Extra points when the whole query equals the keyword.
pub const EXACT_BONUS: u32 = 2;

/// Raw score of `entry` against an already-lowercased query.
pub fn raw_score(entry: &KnowledgeEntry, normalized_query: &str) -> u32 {
    entry
        .keywords
        .iter()
        .map(|key| {
            let mut points = 0;
            if normalized_query.contains(key.as_str()) {
                points += CONTAINS_POINTS;
            }
            if normalized_query == key.as_str() {
                points += EXACT_BONUS;
            }
            points
        })
        .sum()
}

/// Raw score times the entry weight.
pub fn final_score(entry: &KnowledgeEntry, normalized_query: &str) -> f32 {
    raw_score(entry, normalized_query) as f32 * entry.weight
}
