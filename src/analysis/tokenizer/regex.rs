//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::error::{IntentError, Result};

/// Default token pattern: runs of two or more word characters.
///
/// Single-character words ("a", "I") are not tokens under this pattern.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// A tokenizer that emits every match of a regular expression as a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with [`DEFAULT_TOKEN_PATTERN`].
    pub fn new() -> Result<Self> {
        Self::with_pattern(DEFAULT_TOKEN_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| IntentError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new().expect("Default regex pattern should be valid")
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| {
                Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
            })
            .collect();

        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
