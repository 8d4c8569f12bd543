//! Lowercase filter implementation.

use crate::analysis::token::{IntoTokenStream, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that converts tokens to lowercase.
///
/// Intent patterns are matched case-insensitively, so both the training
/// patterns and user input pass through this filter.
///
/// ```
/// use intentbot::analysis::token_filter::Filter;
/// use intentbot::analysis::token_filter::lowercase::LowercaseFilter;
/// use intentbot::analysis::token::{IntoTokenStream, Token};
///
/// let filter = LowercaseFilter::new();
/// let tokens = vec![Token::new("HeLLo", 0)];
/// let result: Vec<_> = filter.filter(tokens.into_token_stream()).unwrap().collect();
/// assert_eq!(result[0].text, "hello");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens = tokens
            .map(|token| {
                if token.text.is_ascii() {
                    token.with_text(token.text.to_ascii_lowercase())
                } else {
                    token.with_text(token.text.to_lowercase())
                }
            })
            .collect::<Vec<_>>();

        Ok(filtered_tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
