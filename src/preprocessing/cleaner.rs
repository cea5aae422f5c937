use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanerError {
    #[error("Input is empty after trimming")]
    EmptyInput,
}

pub struct Cleaner;

impl Cleaner {
    /// Submission gate: blank input is refused. The text itself is passed through
    /// untouched so the transcript shows exactly what was typed.
    pub fn check_submission(input: &str) -> Result<&str, CleanerError> {
        if input.trim().is_empty() {
            return Err(CleanerError::EmptyInput);
        }
        Ok(input)
    }

    /// Query form used by the matcher. Lowercase only: whitespace is significant for
    /// the exact-match bonus.
    pub fn normalize_query(input: &str) -> String {
        input.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(Cleaner::check_submission(""), Err(CleanerError::EmptyInput));
        assert_eq!(Cleaner::check_submission(" \t\n "), Err(CleanerError::EmptyInput));
    }

    #[test]
    fn text_passes_through_untrimmed() {
        assert_eq!(Cleaner::check_submission("  tara "), Ok("  tara "));
    }

    #[test]
    fn normalization_only_lowercases() {
        assert_eq!(Cleaner::normalize_query(" What IS "), " what is ");
    }
}
