// src/config.rs
// =============================================================================
// Immutable run parameters shared (read-only) by every worker.
//
// The word is folded to lowercase ONCE here when matching is case-insensitive,
// so workers only have to fold the lines they read.
// =============================================================================

use crate::cli::Cli;
use crate::error::ConfigError;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    word: String,
    case_sensitive: bool,
    concurrency_limit: usize,
}

impl Config {
    pub fn new(
        word: impl Into<String>,
        case_sensitive: bool,
        concurrency_limit: usize,
    ) -> Result<Self, ConfigError> {
        let word = word.into();
        if word.is_empty() {
            return Err(ConfigError::EmptyWord);
        }
        if concurrency_limit == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        let word = if case_sensitive { word } else { word.to_lowercase() };

        Ok(Self {
            word,
            case_sensitive,
            concurrency_limit,
        })
    }

    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::new(cli.word.clone(), cli.case_sensitive, cli.workers)
    }

    /// The target word, already folded when matching ignores case.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Counts non-overlapping occurrences of the word in one line of content.
    pub fn count_in_line(&self, line: &str) -> u64 {
        let line = if self.case_sensitive {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(line.to_lowercase())
        };
        line.matches(self.word.as_str()).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_folded_once_when_case_insensitive() {
        let config = Config::new("GoLang", false, 5).unwrap();
        assert_eq!(config.word(), "golang");

        let config = Config::new("GoLang", true, 5).unwrap();
        assert_eq!(config.word(), "GoLang");
    }

    #[test]
    fn test_rejects_empty_word_and_zero_limit() {
        assert_eq!(Config::new("", false, 5), Err(ConfigError::EmptyWord));
        assert_eq!(Config::new("go", false, 0), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn test_count_is_non_overlapping() {
        let config = Config::new("aa", true, 1).unwrap();
        assert_eq!(config.count_in_line("aaaa"), 2);
        assert_eq!(config.count_in_line("aaa"), 1);
    }

    #[test]
    fn test_case_insensitive_count() {
        let config = Config::new("go", false, 1).unwrap();
        assert_eq!(config.count_in_line("Go go GO gO"), 4);
    }

    #[test]
    fn test_case_sensitive_count() {
        let config = Config::new("go", true, 1).unwrap();
        assert_eq!(config.count_in_line("Go go GO gO"), 1);
        assert_eq!(config.count_in_line("google golang"), 2);
    }
}
