//! Distance-embedding encoding of dirty string categories.

use super::config::DistanceConfig;
use crate::data::DataFrame;
use crate::decomposition::TruncatedSvd;
use crate::error::{EncoderError, Result};
use crate::metrics::{pairwise, Metric};
use crate::primitives::Matrix;
use crate::text::ngram::CharNgramVectorizer;
use crate::traits::CategoricalEncoder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DistanceModel {
    categories: Vec<String>,
    vectorizer: CharNgramVectorizer,
    features: Matrix<bool>,
    metric: Metric,
    svd: TruncatedSvd,
}

/// Embeds each string as its SVD-reduced vector of distances to the training
/// categories.
///
/// Fit computes the full `n × n` distance matrix between the distinct
/// training strings and fits a [`TruncatedSvd`] on it. Transform computes the
/// distances of each distinct input string to the same `n` categories and
/// projects them, so unseen strings need no special handling.
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::prelude::*;
///
/// let train = DataFrame::from_strings("city", &["London", "Londres", "Paris", "Pariss"]).unwrap();
/// let mut encoder = StringDistanceEncoder::new(2);
/// let embedded = encoder.fit_transform(&train).unwrap();
/// assert_eq!(embedded.shape(), (4, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringDistanceEncoder {
    n_components: usize,
    metric: Metric,
    ngram_range: (usize, usize),
    lowercase: bool,
    model: Option<DistanceModel>,
}

impl Default for StringDistanceEncoder {
    fn default() -> Self {
        Self::new(2)
    }
}

impl StringDistanceEncoder {
    /// Creates an encoder producing `n_components` columns.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            metric: Metric::default(),
            ngram_range: (1, 3),
            lowercase: true,
            model: None,
        }
    }

    /// Builds an encoder from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidHyperparameter`] for an unsupported
    /// metric, an invalid n-gram range or `n_components == 0`.
    pub fn from_config(config: &DistanceConfig) -> Result<Self> {
        let metric = config.parse()?;
        Ok(Self {
            n_components: config.n_components,
            metric,
            ngram_range: config.ngram_range,
            lowercase: config.lowercase,
            model: None,
        })
    }

    /// Sets the string distance used by the next `fit`.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the inclusive character n-gram range.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Enables or disables lowercasing before n-gram extraction.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Embedding width.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Configured metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Sorted distinct training categories.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self
            .model
            .as_ref()
            .expect("StringDistanceEncoder not fitted. Call fit() first.")
            .categories
    }

    /// The fitted projection.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn svd(&self) -> &TruncatedSvd {
        &self
            .model
            .as_ref()
            .expect("StringDistanceEncoder not fitted. Call fit() first.")
            .svd
    }
}

impl CategoricalEncoder for StringDistanceEncoder {
    type Output = Matrix<f64>;

    fn fit(&mut self, x: &DataFrame) -> Result<()> {
        let values = x.single_text_column()?;
        if self.n_components == 0 {
            return Err(EncoderError::invalid_hyperparameter(
                "n_components",
                self.n_components,
                "a positive integer",
            ));
        }
        if values.is_empty() {
            return Err(EncoderError::empty_input("no categories to embed"));
        }

        let mut categories = values.to_vec();
        categories.sort();
        categories.dedup();

        let mut vectorizer = CharNgramVectorizer::new()
            .with_ngram_range(self.ngram_range.0, self.ngram_range.1)
            .with_lowercase(self.lowercase);
        vectorizer.fit(&categories)?;
        let features = vectorizer.transform_binary(&categories)?;

        let distances = pairwise(&features, &features, self.metric)?;
        let mut svd = TruncatedSvd::new(self.n_components);
        svd.fit(&distances)?;

        log::debug!(
            "embedded {} categories into {} components (metric={})",
            categories.len(),
            self.n_components,
            self.metric
        );

        self.model = Some(DistanceModel {
            categories,
            vectorizer,
            features,
            metric: self.metric,
            svd,
        });
        Ok(())
    }

    fn transform(&self, x: &DataFrame) -> Result<Matrix<f64>> {
        let values = x.single_text_column()?;
        let model = self.model.as_ref().ok_or(EncoderError::NotFitted {
            estimator: "StringDistanceEncoder",
        })?;

        // Distinct values in first-seen order, and each row's index into them.
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut distinct: Vec<&str> = Vec::new();
        let rows: Vec<usize> = values
            .iter()
            .map(|v| {
                *position.entry(v.as_str()).or_insert_with(|| {
                    distinct.push(v.as_str());
                    distinct.len() - 1
                })
            })
            .collect();

        let k = model.svd.n_components();
        let mut out = Matrix::zeros(values.len(), k);
        if distinct.is_empty() {
            return Ok(out);
        }

        let query = model.vectorizer.transform_binary(&distinct)?;
        let distances = pairwise(&query, &model.features, model.metric)?;
        let embedded = model.svd.transform(&distances)?;

        for (i, &r) in rows.iter().enumerate() {
            out.row_mut(i).copy_from_slice(embedded.row(r));
        }

        log::debug!(
            "embedded {} rows ({} distinct values)",
            values.len(),
            distinct.len()
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "string_distance_tests.rs"]
mod tests;
