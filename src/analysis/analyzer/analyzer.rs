//! Core analyzer trait definition.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → TfIdfVectorizer
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 .. Filter N
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// Implementations must be `Send + Sync`: a trained engine owns its analyzer
/// and is shared read-only between threads.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and logging).
    fn name(&self) -> &str;
}
