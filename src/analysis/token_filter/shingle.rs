//! Word n-gram ("shingle") filter.
//!
//! Combines contiguous runs of word tokens into single n-gram tokens, joined
//! by one space. All n-grams of size `min_size` are emitted first, then all
//! of the next size, up to `max_size`.
//!
//! ```
//! use intentbot::analysis::token::{IntoTokenStream, Token};
//! use intentbot::analysis::token_filter::Filter;
//! use intentbot::analysis::token_filter::shingle::ShingleFilter;
//!
//! let filter = ShingleFilter::new(1, 2).unwrap();
//! let tokens = vec![Token::new("good", 0), Token::new("morning", 1)];
//! let result: Vec<String> = filter
//!     .filter(tokens.into_token_stream())
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//! assert_eq!(result, vec!["good", "morning", "good morning"]);
//! ```

use crate::analysis::token::{IntoTokenStream, Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{IntentError, Result};

/// Separator placed between words of an n-gram.
pub const SHINGLE_SEPARATOR: &str = " ";

/// A filter producing contiguous word n-grams of sizes `min_size..=max_size`.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    /// Minimum n-gram size
    min_size: usize,
    /// Maximum n-gram size
    max_size: usize,
}

impl ShingleFilter {
    /// Create a new shingle filter.
    ///
    /// # Errors
    ///
    /// Returns an analysis error if `min_size` is 0 or `max_size < min_size`.
    pub fn new(min_size: usize, max_size: usize) -> Result<Self> {
        if min_size == 0 {
            return Err(IntentError::analysis("min_size must be at least 1"));
        }
        if max_size < min_size {
            return Err(IntentError::analysis(format!(
                "max_size ({max_size}) must be >= min_size ({min_size})"
            )));
        }
        Ok(Self { min_size, max_size })
    }

    /// Minimum n-gram size.
    pub fn min_size(&self) -> usize {
        self.min_size
    }

    /// Maximum n-gram size.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();
        let mut shingles = Vec::new();

        for size in self.min_size..=self.max_size {
            if size > words.len() {
                break;
            }
            for window in words.windows(size) {
                let first = &window[0];
                let last = &window[size - 1];
                let text = window
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(SHINGLE_SEPARATOR);

                shingles.push(
                    Token::with_offsets(text, first.position, first.start_offset, last.end_offset)
                        .with_position_length(size),
                );
            }
        }

        Ok(shingles.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
