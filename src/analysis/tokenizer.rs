//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of the analysis pipeline: they split raw
//! text into word tokens that filters then normalize and combine.
//!
//! # Available Tokenizers
//!
//! - [`regex::RegexTokenizer`] - Regex-based tokenization (default `\b\w\w+\b`)
//!
//! # Examples
//!
//! ```
//! use intentbot::analysis::tokenizer::Tokenizer;
//! use intentbot::analysis::tokenizer::regex::RegexTokenizer;
//!
//! let tokenizer = RegexTokenizer::new().unwrap();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so that a trained engine holding a
/// tokenizer can be shared across threads.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
