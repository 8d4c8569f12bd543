//! Engine configuration.
//!
//! The defaults reproduce the reference chatbot setup: word n-grams of length
//! 1 to 4, lowercased input, L2-regularised logistic regression with `C = 1`
//! and an iteration budget of 10000.
//!
//! Configuration files are JSON; any missing field takes its default value.
//!
//! ```
//! use intentbot::config::{EngineConfig, MultiClass};
//!
//! let config: EngineConfig =
//!     serde_json::from_str(r#"{"classifier": {"multi_class": "one_vs_rest"}}"#).unwrap();
//! assert_eq!(config.classifier.multi_class, MultiClass::OneVsRest);
//! assert_eq!(config.vectorizer.max_ngram, 4);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::regex::DEFAULT_TOKEN_PATTERN;
use crate::error::{IntentError, Result};

/// Top-level configuration for a classification engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Feature extraction settings.
    pub vectorizer: VectorizerConfig,
    /// Classifier training settings.
    pub classifier: LogisticRegressionConfig,
}

impl EngineConfig {
    /// Load a configuration from a JSON file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()
    }
}

/// Settings for the TF-IDF feature extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    /// Smallest word n-gram length.
    pub min_ngram: usize,
    /// Largest word n-gram length.
    pub max_ngram: usize,
    /// Fold case before building n-grams.
    pub lowercase: bool,
    /// Regular expression whose matches are the word tokens.
    pub token_pattern: String,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            min_ngram: 1,
            max_ngram: 4,
            lowercase: true,
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
        }
    }
}

impl VectorizerConfig {
    fn validate(&self) -> Result<()> {
        if self.min_ngram == 0 {
            return Err(IntentError::invalid_config(
                "vectorizer.min_ngram must be at least 1",
            ));
        }
        if self.min_ngram > self.max_ngram {
            return Err(IntentError::invalid_config(format!(
                "vectorizer.min_ngram ({}) must not exceed vectorizer.max_ngram ({})",
                self.min_ngram, self.max_ngram
            )));
        }
        if self.token_pattern.is_empty() {
            return Err(IntentError::invalid_config(
                "vectorizer.token_pattern must not be empty",
            ));
        }
        Ok(())
    }
}

/// How a linear model handles more than two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// A single softmax model over all classes.
    Multinomial,
    /// One independent sigmoid model per class.
    OneVsRest,
}

/// Settings for logistic regression training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticRegressionConfig {
    /// Inverse regularisation strength; smaller values regularise more.
    pub c: f64,
    /// Iteration budget for the solver.
    pub max_iter: usize,
    /// Stop once every gradient component is below this value.
    pub tol: f64,
    /// Multi-class strategy.
    pub multi_class: MultiClass,
    /// Seed logged at training time. The solver starts from zero weights and
    /// is deterministic, so this does not change the result.
    pub random_state: u64,
}

impl Default for LogisticRegressionConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 10_000,
            tol: 1e-4,
            multi_class: MultiClass::Multinomial,
            random_state: 0,
        }
    }
}

impl LogisticRegressionConfig {
    fn validate(&self) -> Result<()> {
        if !(self.c > 0.0 && self.c.is_finite()) {
            return Err(IntentError::invalid_config(format!(
                "classifier.c must be a positive number, got {}",
                self.c
            )));
        }
        if !(self.tol > 0.0 && self.tol.is_finite()) {
            return Err(IntentError::invalid_config(format!(
                "classifier.tol must be a positive number, got {}",
                self.tol
            )));
        }
        if self.max_iter == 0 {
            return Err(IntentError::invalid_config(
                "classifier.max_iter must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.vectorizer.min_ngram, 1);
        assert_eq!(config.vectorizer.max_ngram, 4);
        assert!(config.vectorizer.lowercase);
        assert_eq!(config.classifier.c, 1.0);
        assert_eq!(config.classifier.max_iter, 10_000);
        assert_eq!(config.classifier.multi_class, MultiClass::Multinomial);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ngram_range() {
        let mut config = EngineConfig::default();
        config.vectorizer.min_ngram = 0;
        assert!(matches!(
            config.validate(),
            Err(IntentError::InvalidConfig(_))
        ));

        config.vectorizer.min_ngram = 5;
        assert!(matches!(
            config.validate(),
            Err(IntentError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_classifier_values() {
        let mut config = EngineConfig::default();
        config.classifier.c = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.classifier.tol = -1.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.classifier.max_iter = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"vectorizer": {{"max_ngram": 2}}, "classifier": {{"c": 10.0}}}}"#)
            .unwrap();

        let config = EngineConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.vectorizer.max_ngram, 2);
        assert_eq!(config.vectorizer.min_ngram, 1);
        assert_eq!(config.classifier.c, 10.0);
        assert_eq!(config.classifier.max_iter, 10_000);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"vectorizer": {{"min_ngram": 3, "max_ngram": 2}}}}"#).unwrap();

        assert!(matches!(
            EngineConfig::load_from_path(file.path()),
            Err(IntentError::InvalidConfig(_))
        ));
    }
}
