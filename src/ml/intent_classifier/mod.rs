//! Intent classification engine.
//!
//! Classifies a short utterance into one of a fixed set of intents and
//! answers with one of that intent's pre-authored responses.
//!
//! # Architecture
//!
//! - `IntentRepository`: validated, read-only knowledge base
//! - `TfIdfVectorizer`: word n-gram (1..=4) TF-IDF feature extraction
//! - `IntentClassifier` trait: common interface for trained classifiers
//! - `LogisticRegression`: multinomial / one-vs-rest logistic regression
//! - `select_response`: uniform response choice with an injected RNG
//! - `ClassificationEngine`: training orchestration and `classify`
//! - `EngineHandle`: atomic swap of retrained engines
//!
//! # Example
//!
//! ```rust,no_run
//! use intentbot::config::EngineConfig;
//! use intentbot::ml::intent_classifier;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = intent_classifier::load_knowledge_base("data/intents.json")?;
//! let engine = intent_classifier::ClassificationEngine::train(repository, EngineConfig::default())?;
//!
//! let response = engine.classify("how are you?")?;
//! println!("{response}");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod core;
mod engine;
mod handle;
mod logistic;
mod repository;
mod selector;
mod tfidf;
mod types;

// Public exports
pub use classifier::IntentClassifier;
pub use core::{load_config, load_knowledge_base, train_from_path};
pub use engine::{ClassificationEngine, EngineState, TrainedModel};
pub use handle::EngineHandle;
pub use logistic::{LogisticRegression, TIE_TOLERANCE};
pub use repository::IntentRepository;
pub use selector::select_response;
pub use tfidf::TfIdfVectorizer;
pub use types::{Classification, FeatureVector, Intent, TrainingPair};
