//! Text analysis for intent patterns and user utterances.
//!
//! Raw text flows through a tokenizer and a chain of token filters before it
//! reaches the feature extractor:
//!
//! ```text
//! "Hello there!" → RegexTokenizer → LowercaseFilter → ShingleFilter
//!                 ["Hello","there"]  ["hello","there"]  ["hello","there","hello there"]
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::*;
pub use token::*;
pub use token_filter::*;
pub use tokenizer::*;
