//! Helper functions for building engines from files.

use std::path::Path;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::ml::intent_classifier::engine::ClassificationEngine;
use crate::ml::intent_classifier::repository::IntentRepository;

/// Load a knowledge base from a JSON file.
pub fn load_knowledge_base<P: AsRef<Path>>(path: P) -> Result<IntentRepository> {
    IntentRepository::load_from_path(path)
}

/// Load an optional configuration file, falling back to defaults.
pub fn load_config<P: AsRef<Path>>(path: Option<P>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load_from_path(path),
        None => Ok(EngineConfig::default()),
    }
}

/// Load a knowledge base and train a new engine on it.
pub fn train_from_path<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<ClassificationEngine> {
    let repository = load_knowledge_base(path)?;
    ClassificationEngine::train(repository, config)
}
