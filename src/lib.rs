//! # intentbot
//!
//! A closed-set, single-turn intent matcher.
//!
//! ## Features
//!
//! - Knowledge base of intents loaded from JSON
//! - Word n-gram TF-IDF feature extraction
//! - Multinomial or one-vs-rest logistic regression
//! - Uniform random response selection with an injectable random source
//! - Immutable, thread-safe engine with atomic swap for retraining
//!
//! ```
//! use intentbot::ml::intent_classifier::{ClassificationEngine, IntentRepository};
//! use intentbot::config::EngineConfig;
//!
//! let repository = IntentRepository::load(r#"[
//!     {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!"]},
//!     {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!"]}
//! ]"#).unwrap();
//!
//! let engine = ClassificationEngine::train(repository, EngineConfig::default()).unwrap();
//! assert_eq!(engine.classify("hello").unwrap(), "Hello!");
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod ml;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
