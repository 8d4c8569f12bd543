//! Intent classifier trait definition.

use crate::error::Result;

use super::types::FeatureVector;

/// Intent classifier trait.
///
/// A trained classifier maps a feature vector to one of the tags it was
/// trained on. Implementations are immutable after training and shared
/// between threads.
pub trait IntentClassifier: Send + Sync + std::fmt::Debug {
    /// Predict the single best tag for a feature vector.
    ///
    /// Ties between equally scored tags go to the lexicographically smallest
    /// tag.
    fn predict(&self, features: &FeatureVector) -> Result<&str>;

    /// Probability of every class, in [`classes`](Self::classes) order.
    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<(&str, f64)>>;

    /// Tags known to the classifier, sorted.
    fn classes(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
