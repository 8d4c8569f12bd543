//! Common types for intent classification.

use serde::{Deserialize, Serialize};

/// A named category of user utterance with example patterns and candidate
/// responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Unique identifier of the intent.
    pub tag: String,
    /// Example utterances used for training.
    pub patterns: Vec<String>,
    /// Candidate outputs, one of which is returned per turn.
    pub responses: Vec<String>,
}

impl Intent {
    /// Create a new intent.
    pub fn new<T, P, R>(tag: T, patterns: P, responses: R) -> Self
    where
        T: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            tag: tag.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            responses: responses.into_iter().map(Into::into).collect(),
        }
    }
}

/// One training example: a pattern labeled with its parent intent's tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    /// Pattern text.
    pub text: String,
    /// Tag of the intent the pattern belongs to.
    pub label: String,
}

/// The outcome of one classification turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted intent tag.
    pub tag: String,
    /// Response selected from that intent.
    pub response: String,
}

/// A fixed-length numeric vector stored sparsely.
///
/// The vector has `dimension` components; only non-zero components are kept,
/// as `(index, value)` pairs sorted by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create the zero vector of the given dimension.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Create a vector from `(index, value)` pairs.
    ///
    /// Pairs are sorted by index, zero values are dropped and entries at the
    /// same index are summed. Indices outside `0..dimension` are discarded.
    pub fn from_entries(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|&(index, _)| index < dimension);
        entries.sort_by_key(|&(index, _)| index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, sum)) if *last == index => *sum += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|&(_, value)| value != 0.0);

        Self {
            dimension,
            entries: merged,
        }
    }

    /// Create a vector from a dense slice.
    pub fn from_dense(values: &[f64]) -> Self {
        let entries = values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, &v)| (i, v))
            .collect();
        Self {
            dimension: values.len(),
            entries,
        }
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Non-zero components, sorted by index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero components.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of one component.
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Squared Euclidean norm.
    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum()
    }

    /// Dot product with a dense weight vector of the same dimension.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(i, v)| v * weights.get(i).copied().unwrap_or(0.0))
            .sum()
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(i, v) in &self.entries {
            dense[i] = v;
        }
        dense
    }
}
