//! TF-IDF vectorizer over word n-grams.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::{Analyzer, StandardAnalyzer};
use crate::config::VectorizerConfig;
use crate::error::{IntentError, Result};

use super::types::FeatureVector;

/// TF-IDF vectorizer for text feature extraction.
///
/// Each n-gram produced by the analyzer is one dimension. After [`fit`], a
/// text is represented by its raw n-gram counts scaled by the smoothed
/// inverse document frequency and normalised to unit length.
///
/// [`fit`]: TfIdfVectorizer::fit
pub struct TfIdfVectorizer {
    /// Vocabulary: n-gram -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency for each n-gram.
    idf: Vec<f64>,
    /// Total number of documents seen during training.
    n_documents: usize,
    /// Analyzer for tokenization and n-gram generation.
    analyzer: Arc<dyn Analyzer>,
    fitted: bool,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .field("analyzer", &self.analyzer.name())
            .field("fitted", &self.fitted)
            .finish()
    }
}

impl TfIdfVectorizer {
    /// Create a new TF-IDF vectorizer with the specified analyzer.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
            analyzer,
            fitted: false,
        }
    }

    /// Create a vectorizer using the standard n-gram analyzer for `config`.
    pub fn from_config(config: &VectorizerConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(StandardAnalyzer::from_config(config)?)))
    }

    /// Fit the vectorizer on training documents.
    ///
    /// Vocabulary indices follow the lexicographic order of the n-grams, so
    /// the fitted state does not depend on document order.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();

        for doc in documents {
            let unique_grams: HashSet<String> = self.ngrams(doc.as_ref())?.into_iter().collect();
            for gram in unique_grams {
                *document_frequency.entry(gram).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(IntentError::insufficient_data(
                "empty vocabulary: the training patterns contain no tokens",
            ));
        }

        let n_documents = documents.len();
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());

        for (idx, (gram, df)) in document_frequency.into_iter().enumerate() {
            // IDF = ln((N + 1) / (df + 1)) + 1
            idf.push(((n_documents as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            vocabulary.insert(gram, idx);
        }

        debug!(
            "fitted tf-idf vectorizer: {} documents, {} n-grams",
            n_documents,
            vocabulary.len()
        );

        self.n_documents = n_documents;
        self.vocabulary = vocabulary;
        self.idf = idf;
        self.fitted = true;

        Ok(())
    }

    /// Transform a document into an L2-normalised TF-IDF feature vector.
    ///
    /// N-grams outside the vocabulary are ignored; a document without any
    /// known n-gram maps to the zero vector.
    pub fn transform(&self, document: &str) -> Result<FeatureVector> {
        if !self.fitted {
            return Err(IntentError::invalid_operation(
                "TF-IDF vectorizer must be fitted before transform",
            ));
        }

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.ngrams(document)? {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        }

        Ok(FeatureVector::from_entries(self.vocabulary.len(), entries))
    }

    /// Fit on `documents` and return their feature vectors.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Vec<FeatureVector>> {
        self.fit(documents)?;
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    fn ngrams(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyzer.analyze(text)?.map(|token| token.text).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Dimension index of an n-gram, if it is in the vocabulary.
    pub fn index_of(&self, ngram: &str) -> Option<usize> {
        self.vocabulary.get(ngram).copied()
    }

    /// Learned IDF weight of a dimension.
    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    /// Number of documents the vectorizer was fitted on.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Whether [`fit`](Self::fit) has completed.
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}
