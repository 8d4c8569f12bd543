//! L2-regularised logistic regression over sparse feature vectors.
//!
//! The model minimises
//!
//! ```text
//! 0.5 * ‖W‖² + C * Σᵢ loss(W xᵢ + b, yᵢ)
//! ```
//!
//! where the loss is the softmax cross-entropy (multinomial) or the sum of
//! per-class binary cross-entropies (one-vs-rest). The intercept is not
//! penalised. Training is full-batch gradient descent from zero parameters
//! with a fixed step of `1 / L`, `L` being an upper bound of the gradient's
//! Lipschitz constant, so every step decreases the objective and the result
//! is the same on every run.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::config::{LogisticRegressionConfig, MultiClass};
use crate::error::{IntentError, Result};

use super::classifier::IntentClassifier;
use super::types::FeatureVector;

/// Relative tolerance under which two decision values count as a tie.
pub const TIE_TOLERANCE: f64 = 1e-12;

/// A trained multi-class logistic regression model.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Class tags, sorted.
    classes: Vec<String>,
    /// One weight vector per class.
    weights: Vec<Vec<f64>>,
    /// One bias per class.
    intercepts: Vec<f64>,
    multi_class: MultiClass,
    dimension: usize,
    n_iter: usize,
    converged: bool,
}

impl LogisticRegression {
    /// Train on feature vectors and their tags.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` if fewer than two distinct tags are present.
    /// - `InvalidOperation` if the number of vectors and labels differ or the
    ///   vectors do not share one dimension.
    pub fn train<S: AsRef<str>>(
        features: &[FeatureVector],
        labels: &[S],
        config: &LogisticRegressionConfig,
    ) -> Result<Self> {
        if features.len() != labels.len() {
            return Err(IntentError::invalid_operation(format!(
                "got {} feature vectors but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .map(|label| label.as_ref().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(IntentError::insufficient_data(format!(
                "at least 2 distinct tags are required, got {}",
                classes.len()
            )));
        }

        let dimension = features[0].dimension();
        if let Some(bad) = features.iter().find(|f| f.dimension() != dimension) {
            return Err(IntentError::invalid_operation(format!(
                "feature vectors must share one dimension ({} vs {})",
                dimension,
                bad.dimension()
            )));
        }

        let targets = labels
            .iter()
            .map(|label| {
                classes
                    .binary_search_by(|c| c.as_str().cmp(label.as_ref()))
                    .map_err(|_| IntentError::unknown_tag(label.as_ref()))
            })
            .collect::<Result<Vec<usize>>>()?;

        debug!(
            "training logistic regression: {} samples, {} classes, {} features, {:?}, random_state={}",
            features.len(),
            classes.len(),
            dimension,
            config.multi_class,
            config.random_state
        );

        let mut model = Self {
            weights: vec![vec![0.0; dimension]; classes.len()],
            intercepts: vec![0.0; classes.len()],
            classes,
            multi_class: config.multi_class,
            dimension,
            n_iter: 0,
            converged: false,
        };
        model.fit(features, &targets, config);

        Ok(model)
    }

    /// Build a model from explicit parameters.
    ///
    /// `classes` must be sorted and unique, with one weight row and one
    /// intercept per class.
    pub fn from_parameters(
        classes: Vec<String>,
        weights: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
        multi_class: MultiClass,
    ) -> Result<Self> {
        if classes.len() < 2 {
            return Err(IntentError::insufficient_data(format!(
                "at least 2 classes are required, got {}",
                classes.len()
            )));
        }
        if classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(IntentError::invalid_operation(
                "classes must be sorted and unique",
            ));
        }
        if weights.len() != classes.len() || intercepts.len() != classes.len() {
            return Err(IntentError::invalid_operation(
                "one weight vector and one intercept are required per class",
            ));
        }
        let dimension = weights[0].len();
        if weights.iter().any(|row| row.len() != dimension) {
            return Err(IntentError::invalid_operation(
                "weight vectors must share one dimension",
            ));
        }

        Ok(Self {
            classes,
            weights,
            intercepts,
            multi_class,
            dimension,
            n_iter: 0,
            converged: true,
        })
    }

    fn fit(&mut self, features: &[FeatureVector], targets: &[usize], config: &LogisticRegressionConfig) {
        let n_classes = self.classes.len();
        let curvature = match self.multi_class {
            MultiClass::Multinomial => 0.5,
            MultiClass::OneVsRest => 0.25,
        };
        let data_term: f64 = features.iter().map(|x| x.squared_norm() + 1.0).sum();
        let step = 1.0 / (1.0 + config.c * curvature * data_term);
        let scale = config.c * features.len() as f64;

        let mut grad_w = vec![vec![0.0; self.dimension]; n_classes];
        let mut grad_b = vec![0.0; n_classes];
        let mut outputs = vec![0.0; n_classes];
        let mut max_grad = f64::INFINITY;

        for iteration in 1..=config.max_iter {
            for (grad_row, row) in grad_w.iter_mut().zip(&self.weights) {
                grad_row.copy_from_slice(row);
            }
            grad_b.fill(0.0);

            for (x, &target) in features.iter().zip(targets) {
                self.decision_into(x, &mut outputs);
                self.link(&mut outputs);

                for (class, output) in outputs.iter().enumerate() {
                    let indicator = if class == target { 1.0 } else { 0.0 };
                    let residual = config.c * (output - indicator);
                    grad_b[class] += residual;
                    for &(idx, value) in x.entries() {
                        grad_w[class][idx] += residual * value;
                    }
                }
            }

            max_grad = grad_w
                .iter()
                .flatten()
                .chain(grad_b.iter())
                .fold(0.0f64, |acc, g| acc.max(g.abs()))
                / scale;

            self.n_iter = iteration;
            if max_grad <= config.tol {
                self.converged = true;
                break;
            }

            for (row, grad_row) in self.weights.iter_mut().zip(&grad_w) {
                for (w, g) in row.iter_mut().zip(grad_row) {
                    *w -= step * g;
                }
            }
            for (b, g) in self.intercepts.iter_mut().zip(&grad_b) {
                *b -= step * g;
            }
        }

        if self.converged {
            debug!("logistic regression converged after {} iterations", self.n_iter);
        } else {
            warn!(
                "logistic regression did not converge within {} iterations (max gradient {:.3e} > tol {:.1e})",
                config.max_iter, max_grad, config.tol
            );
        }
    }

    /// Raw decision values `w·x + b` per class.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.check_dimension(features)?;
        let mut outputs = vec![0.0; self.classes.len()];
        self.decision_into(features, &mut outputs);
        Ok(outputs)
    }

    fn decision_into(&self, features: &FeatureVector, outputs: &mut [f64]) {
        for (out, (row, bias)) in outputs
            .iter_mut()
            .zip(self.weights.iter().zip(&self.intercepts))
        {
            *out = features.dot(row) + bias;
        }
    }

    /// Turn decision values into per-class outputs of the training loss:
    /// softmax probabilities or independent sigmoids.
    fn link(&self, values: &mut [f64]) {
        match self.multi_class {
            MultiClass::Multinomial => softmax(values),
            MultiClass::OneVsRest => values.iter_mut().for_each(|v| *v = sigmoid(*v)),
        }
    }

    fn check_dimension(&self, features: &FeatureVector) -> Result<()> {
        if features.dimension() != self.dimension {
            return Err(IntentError::invalid_operation(format!(
                "feature vector has dimension {}, model expects {}",
                features.dimension(),
                self.dimension
            )));
        }
        Ok(())
    }

    /// Per-class weight vectors, in class order.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Per-class intercepts, in class order.
    pub fn intercepts(&self) -> &[f64] {
        &self.intercepts
    }

    /// Multi-class strategy of the model.
    pub fn multi_class(&self) -> MultiClass {
        self.multi_class
    }

    /// Feature dimension the model expects.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Iterations used by training.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    /// Whether training reached the gradient tolerance.
    pub fn converged(&self) -> bool {
        self.converged
    }
}

impl IntentClassifier for LogisticRegression {
    fn predict(&self, features: &FeatureVector) -> Result<&str> {
        let scores = self.decision_function(features)?;

        // Classes are sorted, so keeping the first of equal scores picks the
        // lexicographically smallest tag.
        let mut best = 0;
        for (class, &score) in scores.iter().enumerate().skip(1) {
            let margin = TIE_TOLERANCE * scores[best].abs().max(1.0);
            if score > scores[best] + margin {
                best = class;
            }
        }

        Ok(&self.classes[best])
    }

    fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<(&str, f64)>> {
        let mut values = self.decision_function(features)?;
        self.link(&mut values);

        if self.multi_class == MultiClass::OneVsRest {
            let total: f64 = values.iter().sum();
            if total > 0.0 {
                values.iter_mut().for_each(|v| *v /= total);
            }
        }

        Ok(self
            .classes
            .iter()
            .map(String::as_str)
            .zip(values)
            .collect())
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn name(&self) -> &str {
        match self.multi_class {
            MultiClass::Multinomial => "logistic_regression_multinomial",
            MultiClass::OneVsRest => "logistic_regression_ovr",
        }
    }
}

fn softmax(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
