//! Standard analyzer for intent patterns.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (`\b\w\w+\b` by default)
//! 2. LowercaseFilter (when enabled)
//! 3. ShingleFilter (word n-grams of the configured range)
//!
//! ```
//! use intentbot::analysis::analyzer::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new().unwrap();
//! let grams: Vec<String> = analyzer.analyze("See you later").unwrap().map(|t| t.text).collect();
//!
//! assert_eq!(grams, vec!["see", "you", "later", "see you", "you later", "see you later"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::shingle::ShingleFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::config::VectorizerConfig;
use crate::error::Result;

/// The analyzer used by the feature extractor.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// Create a standard analyzer with the default vectorizer settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&VectorizerConfig::default())
    }

    /// Build the pipeline described by a vectorizer configuration.
    pub fn from_config(config: &VectorizerConfig) -> Result<Self> {
        let tokenizer = Arc::new(RegexTokenizer::with_pattern(&config.token_pattern)?);
        let mut analyzer = PipelineAnalyzer::new(tokenizer);

        if config.lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }

        let analyzer = analyzer
            .add_filter(Arc::new(ShingleFilter::new(
                config.min_ngram,
                config.max_ngram,
            )?))
            .with_name(format!(
                "standard_ngram_{}_{}",
                config.min_ngram, config.max_ngram
            ));

        Ok(StandardAnalyzer { inner: analyzer })
    }

    /// Get the inner pipeline analyzer.
    pub fn inner(&self) -> &PipelineAnalyzer {
        &self.inner
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
