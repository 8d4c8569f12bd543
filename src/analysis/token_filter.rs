//! Token filter implementations.
//!
//! Filters receive a token stream and produce a new one, modifying or
//! combining tokens along the way.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Case folding
//! - [`shingle::ShingleFilter`] - Contiguous word n-grams

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// # Examples
///
/// ```
/// use intentbot::analysis::token::{Token, TokenStream};
/// use intentbot::analysis::token_filter::Filter;
/// use intentbot::error::Result;
///
/// struct ReverseFilter;
///
/// impl Filter for ReverseFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         let reversed: Vec<Token> = tokens
///             .map(|mut t| {
///                 t.text = t.text.chars().rev().collect();
///                 t
///             })
///             .collect();
///         Ok(Box::new(reversed.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "reverse"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod lowercase;
pub mod shingle;
