//! The classification engine: training orchestration and per-turn inference.
//!
//! ```text
//! initialize:  repository ─► training pairs ─► fit vectorizer ─► transform ─► train classifier
//! classify:    text ─► transform ─► predict ─► tag ─► select response
//! ```

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::Rng;

use crate::config::EngineConfig;
use crate::error::{IntentError, Result};

use super::classifier::IntentClassifier;
use super::logistic::LogisticRegression;
use super::repository::IntentRepository;
use super::selector::select_response;
use super::tfidf::TfIdfVectorizer;
use super::types::Classification;

/// Everything produced by training. Never modified afterwards.
#[derive(Debug)]
pub struct TrainedModel {
    repository: IntentRepository,
    vectorizer: TfIdfVectorizer,
    classifier: Box<dyn IntentClassifier>,
    training_accuracy: f64,
    training_duration: Duration,
}

impl TrainedModel {
    /// The knowledge base the model was trained on.
    pub fn repository(&self) -> &IntentRepository {
        &self.repository
    }

    /// The fitted feature extractor.
    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// The trained classifier.
    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    /// Fraction of training patterns predicted as their own tag.
    pub fn training_accuracy(&self) -> f64 {
        self.training_accuracy
    }

    /// Wall time spent training.
    pub fn training_duration(&self) -> Duration {
        self.training_duration
    }
}

/// Lifecycle state of an engine.
#[derive(Debug)]
pub enum EngineState {
    /// No model yet; classification is refused.
    Untrained,
    /// Training finished; the engine answers requests.
    Ready(TrainedModel),
}

/// Intent classification engine.
///
/// Starts `Untrained`; [`initialize`](Self::initialize) trains it once and
/// moves it to `Ready`. A ready engine is only read, so it can be shared
/// between threads behind an `Arc`. Retraining means building a new engine
/// (see [`EngineHandle`](super::handle::EngineHandle)).
#[derive(Debug)]
pub struct ClassificationEngine {
    config: EngineConfig,
    state: EngineState,
}

impl ClassificationEngine {
    /// Create an untrained engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: EngineState::Untrained,
        }
    }

    /// Create an engine and train it on `repository`.
    pub fn train(repository: IntentRepository, config: EngineConfig) -> Result<Self> {
        let mut engine = Self::new(config);
        engine.initialize(repository)?;
        Ok(engine)
    }

    /// Train the engine on a knowledge base.
    ///
    /// On error the engine stays untrained.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if the repository has fewer than two tags.
    /// - `InvalidOperation` if the engine is already trained.
    /// - `InvalidConfig` if the configuration is unusable.
    pub fn initialize(&mut self, repository: IntentRepository) -> Result<()> {
        if self.is_ready() {
            return Err(IntentError::invalid_operation(
                "engine is already trained; build a new engine to retrain",
            ));
        }
        self.config.validate()?;

        let tag_count = repository.len();
        if tag_count < 2 {
            return Err(IntentError::insufficient_data(format!(
                "at least 2 distinct tags are required, got {tag_count}"
            )));
        }

        let start = Instant::now();
        let pairs = repository.training_pairs();
        let texts: Vec<&str> = pairs.iter().map(|p| p.text.as_str()).collect();
        let labels: Vec<&str> = pairs.iter().map(|p| p.label.as_str()).collect();

        let mut vectorizer = TfIdfVectorizer::from_config(&self.config.vectorizer)?;
        let features = vectorizer.fit_transform(&texts)?;
        let classifier = LogisticRegression::train(&features, &labels, &self.config.classifier)?;

        let mut correct = 0usize;
        for (x, label) in features.iter().zip(&labels) {
            if classifier.predict(x)? == *label {
                correct += 1;
            }
        }
        let training_accuracy = correct as f64 / features.len() as f64;
        let training_duration = start.elapsed();

        info!(
            "trained {} on {} intents / {} patterns ({} n-grams) in {:?}, training accuracy {:.1}%",
            classifier.name(),
            tag_count,
            pairs.len(),
            vectorizer.vocabulary_size(),
            training_duration,
            training_accuracy * 100.0
        );

        self.state = EngineState::Ready(TrainedModel {
            repository,
            vectorizer,
            classifier: Box::new(classifier),
            training_accuracy,
            training_duration,
        });

        Ok(())
    }

    /// Whether the engine has been trained.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The trained model, or `EngineNotReady`.
    pub fn model(&self) -> Result<&TrainedModel> {
        match &self.state {
            EngineState::Ready(model) => Ok(model),
            EngineState::Untrained => Err(IntentError::EngineNotReady),
        }
    }

    /// The knowledge base, or `EngineNotReady`.
    pub fn repository(&self) -> Result<&IntentRepository> {
        Ok(&self.model()?.repository)
    }

    /// Predict the tag of `text` without selecting a response.
    pub fn predict_tag(&self, text: &str) -> Result<&str> {
        let model = self.model()?;
        let features = model.vectorizer.transform(text)?;
        model.classifier.predict(&features)
    }

    /// Classify `text` and return a response, using the thread-local RNG.
    pub fn classify(&self, text: &str) -> Result<String> {
        self.classify_with(text, &mut rand::rng())
    }

    /// Classify `text` and return a response drawn with `rng`.
    pub fn classify_with<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<String> {
        Ok(self.classify_detailed(text, rng)?.response)
    }

    /// Classify `text` and return both the tag and the response.
    pub fn classify_detailed<R: Rng + ?Sized>(
        &self,
        text: &str,
        rng: &mut R,
    ) -> Result<Classification> {
        let model = self.model()?;
        let tag = self.predict_tag(text)?;
        let response = select_response(tag, &model.repository, rng)?;

        debug!("classified {text:?} as '{tag}'");

        Ok(Classification {
            tag: tag.to_string(),
            response: response.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::MultiClass;
    use crate::ml::intent_classifier::types::Intent;

    fn greetings() -> IntentRepository {
        IntentRepository::from_intents(vec![
            Intent::new("greeting", ["hi", "hello"], ["Hello!"]),
            Intent::new("farewell", ["bye", "goodbye"], ["Goodbye!"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_greeting_farewell_scenario() {
        let engine = ClassificationEngine::train(greetings(), EngineConfig::default()).unwrap();

        assert!(engine.is_ready());
        assert_eq!(engine.classify("hello").unwrap(), "Hello!");
        assert_eq!(engine.classify("bye").unwrap(), "Goodbye!");
        assert_eq!(engine.predict_tag("HELLO!!").unwrap(), "greeting");
    }

    #[test]
    fn test_untrained_engine_refuses() {
        let engine = ClassificationEngine::new(EngineConfig::default());

        assert!(!engine.is_ready());
        assert!(matches!(
            engine.classify("hello"),
            Err(IntentError::EngineNotReady)
        ));
        assert!(matches!(
            engine.predict_tag("hello"),
            Err(IntentError::EngineNotReady)
        ));
        assert!(matches!(engine.repository(), Err(IntentError::EngineNotReady)));
    }

    #[test]
    fn test_single_tag_is_insufficient() {
        let repository =
            IntentRepository::from_intents(vec![Intent::new("greeting", ["hi", "hello"], ["Hello!"])])
                .unwrap();

        let mut engine = ClassificationEngine::new(EngineConfig::default());
        assert!(matches!(
            engine.initialize(repository),
            Err(IntentError::InsufficientData(_))
        ));
        assert!(!engine.is_ready());
    }

    #[test]
    fn test_initialize_twice_is_rejected() {
        let mut engine = ClassificationEngine::train(greetings(), EngineConfig::default()).unwrap();
        assert!(matches!(
            engine.initialize(greetings()),
            Err(IntentError::InvalidOperation(_))
        ));
        assert_eq!(engine.classify("hi").unwrap(), "Hello!");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EngineConfig::default();
        config.vectorizer.max_ngram = 0;

        let result = ClassificationEngine::train(greetings(), config);
        assert!(matches!(result, Err(IntentError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_vocabulary_still_answers() {
        let engine = ClassificationEngine::train(greetings(), EngineConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let result = engine.classify_detailed("xyzabc123", &mut rng).unwrap();
        let repository = engine.repository().unwrap();
        assert!(
            repository
                .responses_for(&result.tag)
                .unwrap()
                .contains(&result.response)
        );
    }

    #[test]
    fn test_classify_with_seed_is_deterministic() {
        let repository = IntentRepository::from_intents(vec![
            Intent::new("greeting", ["hi", "hello"], ["Hello!", "Hi!", "Hey there"]),
            Intent::new("farewell", ["bye", "goodbye"], ["Goodbye!", "See you"]),
        ])
        .unwrap();
        let engine = ClassificationEngine::train(repository, EngineConfig::default()).unwrap();

        let first = engine
            .classify_with("hello", &mut StdRng::seed_from_u64(5))
            .unwrap();
        let second = engine
            .classify_with("hello", &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_one_vs_rest_engine() {
        let mut config = EngineConfig::default();
        config.classifier.multi_class = MultiClass::OneVsRest;

        let engine = ClassificationEngine::train(greetings(), config).unwrap();
        assert_eq!(engine.predict_tag("goodbye").unwrap(), "farewell");
        assert_eq!(engine.predict_tag("hi").unwrap(), "greeting");
    }

    #[test]
    fn test_training_statistics() {
        let engine = ClassificationEngine::train(greetings(), EngineConfig::default()).unwrap();
        let model = engine.model().unwrap();

        assert_eq!(model.training_accuracy(), 1.0);
        assert_eq!(model.vectorizer().vocabulary_size(), 4);
        assert_eq!(model.classifier().classes().len(), 2);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassificationEngine>();
    }
}
