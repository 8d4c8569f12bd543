//! Machine learning components.
//!
//! The crate's statistical model lives in [`intent_classifier`]: TF-IDF
//! features over word n-grams feeding a logistic regression.

pub mod intent_classifier;

pub use intent_classifier::{ClassificationEngine, EngineHandle, IntentRepository};
