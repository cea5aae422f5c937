pub mod cleaner;

pub use cleaner::{Cleaner, CleanerError};
