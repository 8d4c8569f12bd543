//! Intent repository: the read-only knowledge base of intents.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IntentError, Result};

use super::types::{Intent, TrainingPair};

/// Intent as it appears in a knowledge-base document, before validation.
#[derive(Debug, Deserialize)]
struct RawIntent {
    tag: Option<String>,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    responses: Vec<String>,
}

/// Accepted document shapes: a bare list or `{"intents": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKnowledgeBase {
    List(Vec<RawIntent>),
    Wrapped { intents: Vec<RawIntent> },
}

/// The validated collection of intents.
///
/// Built once and never mutated. Every intent has a non-blank tag, at least
/// one pattern and at least one response, and tags are unique.
#[derive(Debug, Clone)]
pub struct IntentRepository {
    intents: Vec<Intent>,
    by_tag: HashMap<String, usize>,
}

impl IntentRepository {
    /// Parse and validate a JSON knowledge base.
    pub fn load(source: &str) -> Result<Self> {
        let raw: RawKnowledgeBase = serde_json::from_str(source).map_err(|e| {
            IntentError::malformed(format!("cannot parse intents document: {e}"))
        })?;

        let raw_intents = match raw {
            RawKnowledgeBase::List(intents) => intents,
            RawKnowledgeBase::Wrapped { intents } => intents,
        };

        let intents = raw_intents
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                let tag = raw.tag.ok_or_else(|| {
                    IntentError::malformed(format!("intent #{position} has no tag"))
                })?;
                Ok(Intent {
                    tag,
                    patterns: raw.patterns,
                    responses: raw.responses,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_intents(intents)
    }

    /// Read and validate a JSON knowledge base from a file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::load(&content)
    }

    /// Validate an in-memory collection of intents.
    pub fn from_intents(intents: Vec<Intent>) -> Result<Self> {
        let mut by_tag = HashMap::with_capacity(intents.len());

        for (position, intent) in intents.iter().enumerate() {
            if intent.tag.trim().is_empty() {
                return Err(IntentError::malformed(format!(
                    "intent #{position} has an empty tag"
                )));
            }
            if intent.patterns.is_empty() {
                return Err(IntentError::malformed(format!(
                    "intent '{}' has no patterns",
                    intent.tag
                )));
            }
            if intent.responses.is_empty() {
                return Err(IntentError::malformed(format!(
                    "intent '{}' has no responses",
                    intent.tag
                )));
            }
            if by_tag.insert(intent.tag.clone(), position).is_some() {
                return Err(IntentError::malformed(format!(
                    "duplicate tag '{}'",
                    intent.tag
                )));
            }
        }

        Ok(Self { intents, by_tag })
    }

    /// All tags, sorted.
    pub fn all_tags(&self) -> BTreeSet<&str> {
        self.intents.iter().map(|i| i.tag.as_str()).collect()
    }

    /// Candidate responses of an intent.
    pub fn responses_for(&self, tag: &str) -> Result<&[String]> {
        self.get(tag)
            .map(|intent| intent.responses.as_slice())
            .ok_or_else(|| IntentError::unknown_tag(tag))
    }

    /// Look up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.by_tag.get(tag).map(|&i| &self.intents[i])
    }

    /// Intents in document order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Whether the repository holds no intents.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Total number of patterns across all intents.
    pub fn pattern_count(&self) -> usize {
        self.intents.iter().map(|i| i.patterns.len()).sum()
    }

    /// Every pattern labeled with its intent's tag, in document order.
    pub fn training_pairs(&self) -> Vec<TrainingPair> {
        self.intents
            .iter()
            .flat_map(|intent| {
                intent.patterns.iter().map(move |pattern| TrainingPair {
                    text: pattern.clone(),
                    label: intent.tag.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const GREETINGS: &str = r#"[
        {"tag": "greeting", "patterns": ["hi", "hello"], "responses": ["Hello!", "Hi there!"]},
        {"tag": "farewell", "patterns": ["bye", "goodbye"], "responses": ["Goodbye!"]}
    ]"#;

    #[test]
    fn test_load_list() {
        let repository = IntentRepository::load(GREETINGS).unwrap();

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.pattern_count(), 4);
        assert_eq!(
            repository.all_tags().into_iter().collect::<Vec<_>>(),
            vec!["farewell", "greeting"]
        );
        assert_eq!(
            repository.responses_for("greeting").unwrap(),
            &["Hello!".to_string(), "Hi there!".to_string()]
        );
    }

    #[test]
    fn test_load_wrapped_document_ignores_extra_fields() {
        let source = r#"{"intents": [
            {"tag": "a", "patterns": ["x"], "responses": ["y"], "context": [""]},
            {"tag": "b", "patterns": ["z"], "responses": ["w"]}
        ]}"#;
        let repository = IntentRepository::load(source).unwrap();
        assert_eq!(repository.len(), 2);
        assert!(repository.get("a").is_some());
    }

    #[test]
    fn test_missing_tag() {
        let source = r#"[{"patterns": ["hi"], "responses": ["Hello!"]}]"#;
        let error = IntentRepository::load(source).unwrap_err();
        assert!(matches!(error, IntentError::MalformedKnowledgeBase(_)));
        assert!(error.to_string().contains("#0 has no tag"));
    }

    #[test]
    fn test_blank_tag() {
        let result = IntentRepository::from_intents(vec![Intent::new("  ", ["hi"], ["Hello!"])]);
        assert!(matches!(result, Err(IntentError::MalformedKnowledgeBase(_))));
    }

    #[test]
    fn test_missing_patterns_or_responses() {
        let no_patterns = r#"[{"tag": "greeting", "responses": ["Hello!"]}]"#;
        assert!(matches!(
            IntentRepository::load(no_patterns),
            Err(IntentError::MalformedKnowledgeBase(_))
        ));

        let no_responses = r#"[{"tag": "greeting", "patterns": ["hi"], "responses": []}]"#;
        let error = IntentRepository::load(no_responses).unwrap_err();
        assert!(error.to_string().contains("'greeting' has no responses"));
    }

    #[test]
    fn test_duplicate_tags() {
        let intents = vec![
            Intent::new("greeting", ["hi"], ["Hello!"]),
            Intent::new("greeting", ["hello"], ["Hey!"]),
        ];
        let error = IntentRepository::from_intents(intents).unwrap_err();
        assert!(error.to_string().contains("duplicate tag 'greeting'"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            IntentRepository::load("not json"),
            Err(IntentError::MalformedKnowledgeBase(_))
        ));
        assert!(matches!(
            IntentRepository::load(r#"{"tag": "lonely"}"#),
            Err(IntentError::MalformedKnowledgeBase(_))
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let repository = IntentRepository::load(GREETINGS).unwrap();
        assert!(matches!(
            repository.responses_for("weather"),
            Err(IntentError::UnknownTag(tag)) if tag == "weather"
        ));
    }

    #[test]
    fn test_training_pairs_follow_document_order() {
        let repository = IntentRepository::load(GREETINGS).unwrap();
        let pairs = repository.training_pairs();

        let flattened: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.text.as_str(), p.label.as_str()))
            .collect();
        assert_eq!(
            flattened,
            vec![
                ("hi", "greeting"),
                ("hello", "greeting"),
                ("bye", "farewell"),
                ("goodbye", "farewell"),
            ]
        );
    }

    #[test]
    fn test_load_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(GREETINGS.as_bytes()).unwrap();

        let repository = IntentRepository::load_from_path(file.path()).unwrap();
        assert_eq!(repository.len(), 2);

        let missing = IntentRepository::load_from_path("/nonexistent/intents.json");
        assert!(matches!(missing, Err(IntentError::Io(_))));
    }
}
