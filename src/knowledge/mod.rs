//! Static FAQ knowledge and the keyword matcher that answers from it.

pub mod base;
pub mod entry;
pub mod matcher;
pub mod scorer;

pub use base::{global, install, KnowledgeBase, KnowledgeError, FALLBACK_RESPONSE};
pub use entry::KnowledgeEntry;
pub use matcher::{Match, ResponseMatcher};
