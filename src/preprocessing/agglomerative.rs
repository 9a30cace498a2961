//! Cluster-label encoding of dirty string categories.

use super::cluster_model::{ClusterModel, ClusterSettings};
use super::config::{AgglomerativeConfig, HandleUnknown};
use crate::cluster::{Criterion, LinkageMethod, LinkageTree};
use crate::data::DataFrame;
use crate::error::{EncoderError, Result};
use crate::metrics::Metric;
use crate::primitives::Matrix;
use crate::traits::CategoricalEncoder;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

/// Row-aligned cluster labels.
///
/// `None` marks a row whose category was unseen during fit under the
/// `impute nan` policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterLabels {
    labels: Vec<Option<usize>>,
}

impl ClusterLabels {
    /// Labels in row order.
    #[must_use]
    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.labels
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of missing labels.
    #[must_use]
    pub fn n_missing(&self) -> usize {
        self.labels.iter().filter(|l| l.is_none()).count()
    }

    /// `n × 1` float column with `NaN` for missing labels.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix<f64> {
        let mut m = Matrix::zeros(self.labels.len(), 1);
        for (i, label) in self.labels.iter().enumerate() {
            m.set(i, 0, label.map_or(f64::NAN, |id| id as f64));
        }
        m
    }

    /// Consumes the labels.
    #[must_use]
    pub fn into_vec(self) -> Vec<Option<usize>> {
        self.labels
    }
}

impl Index<usize> for ClusterLabels {
    type Output = Option<usize>;

    fn index(&self, row: usize) -> &Self::Output {
        &self.labels[row]
    }
}

impl From<Vec<Option<usize>>> for ClusterLabels {
    fn from(labels: Vec<Option<usize>>) -> Self {
        Self { labels }
    }
}

/// Encodes a string column as agglomerative cluster labels.
///
/// Distinct training strings are embedded as character n-gram presence
/// vectors, clustered hierarchically under a string distance, and the tree is
/// cut into flat clusters `1..=K`. At transform time known strings map to
/// their cluster directly; unseen strings are either assigned to the closest
/// cluster under the same linkage rule (`force linkage`) or left missing
/// (`impute nan`).
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::prelude::*;
///
/// let train = DataFrame::from_strings("job", &["cego", "cegp", "xyz123"]).unwrap();
/// let mut encoder = StringAgglomerativeEncoder::new(2.0);
/// encoder.fit(&train).unwrap();
///
/// let test = DataFrame::from_strings("job", &["cegq", "xyz123"]).unwrap();
/// let labels = encoder.transform(&test).unwrap();
/// assert_eq!(labels[0], encoder.cluster_of("cego"));
/// assert_eq!(labels[1], encoder.cluster_of("xyz123"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringAgglomerativeEncoder {
    settings: ClusterSettings,
    handle_unknown: HandleUnknown,
    model: Option<ClusterModel>,
}

impl StringAgglomerativeEncoder {
    /// Creates an encoder forming `t` clusters with default options.
    ///
    /// Options are validated by [`fit`](CategoricalEncoder::fit); use
    /// [`from_config`](Self::from_config) to validate up front.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self {
            settings: ClusterSettings {
                t,
                metric: Metric::default(),
                linkage_method: LinkageMethod::default(),
                ngram_range: (1, 3),
                lowercase: true,
                criterion: Criterion::default(),
            },
            handle_unknown: HandleUnknown::default(),
            model: None,
        }
    }

    /// Builds an encoder from a configuration, parsing every option.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidHyperparameter`] for an unsupported
    /// metric, linkage method, criterion or unknown policy, an invalid n-gram
    /// range, or a `t` unusable under the criterion.
    pub fn from_config(config: &AgglomerativeConfig) -> Result<Self> {
        let (metric, linkage_method, criterion, handle_unknown) = config.parse()?;
        Ok(Self {
            settings: ClusterSettings {
                t: config.t,
                metric,
                linkage_method,
                ngram_range: config.ngram_range,
                lowercase: config.lowercase,
                criterion,
            },
            handle_unknown,
            model: None,
        })
    }

    /// Sets the string distance.
    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.settings.metric = metric;
        self
    }

    /// Sets the linkage method used for clustering and for unknowns.
    #[must_use]
    pub fn with_linkage_method(mut self, method: LinkageMethod) -> Self {
        self.settings.linkage_method = method;
        self
    }

    /// Sets the inclusive character n-gram range.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.settings.ngram_range = (min_n, max_n);
        self
    }

    /// Enables or disables lowercasing before n-gram extraction.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.settings.lowercase = lowercase;
        self
    }

    /// Sets how the tree is cut into flat clusters.
    #[must_use]
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.settings.criterion = criterion;
        self
    }

    /// Sets the policy for categories unseen during fit.
    #[must_use]
    pub fn with_handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// Cluster count or cut height.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.settings.t
    }

    /// Configured metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.settings.metric
    }

    /// Configured linkage method.
    #[must_use]
    pub fn linkage_method(&self) -> LinkageMethod {
        self.settings.linkage_method
    }

    /// Configured n-gram range.
    #[must_use]
    pub fn ngram_range(&self) -> (usize, usize) {
        self.settings.ngram_range
    }

    /// Whether strings are lowercased.
    #[must_use]
    pub fn lowercase(&self) -> bool {
        self.settings.lowercase
    }

    /// Configured criterion.
    #[must_use]
    pub fn criterion(&self) -> Criterion {
        self.settings.criterion
    }

    /// Configured unknown policy.
    #[must_use]
    pub fn handle_unknown(&self) -> HandleUnknown {
        self.handle_unknown
    }

    /// Returns true if the encoder has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// The fitted cluster model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&ClusterModel> {
        self.model.as_ref()
    }

    fn fitted(&self) -> &ClusterModel {
        self.model
            .as_ref()
            .expect("StringAgglomerativeEncoder not fitted. Call fit() first.")
    }

    fn fitted_or_err(&self) -> Result<&ClusterModel> {
        self.model.as_ref().ok_or(EncoderError::NotFitted {
            estimator: "StringAgglomerativeEncoder",
        })
    }

    /// Sorted distinct training categories.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.fitted().categories()
    }

    /// Cluster ids aligned with [`categories`](Self::categories).
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn clusters(&self) -> &[usize] {
        self.fitted().labels()
    }

    /// Number of flat clusters.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.fitted().n_clusters()
    }

    /// The linkage tree built at fit time.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn linkage_tree(&self) -> &LinkageTree {
        self.fitted().linkage_tree()
    }

    /// Training category -> cluster id, ordered by category.
    ///
    /// # Panics
    ///
    /// Panics if the encoder is not fitted.
    #[must_use]
    pub fn cluster_mapping(&self) -> BTreeMap<&str, usize> {
        let model = self.fitted();
        model
            .categories()
            .iter()
            .map(String::as_str)
            .zip(model.labels().iter().copied())
            .collect()
    }

    /// Cluster of a training category; `None` if unseen or not fitted.
    #[must_use]
    pub fn cluster_of(&self, category: &str) -> Option<usize> {
        self.model.as_ref().and_then(|m| m.cluster_of(category))
    }

    /// Places `category` as if it had not been seen during fit, applying the
    /// unknown policy. Training categories are not looked up.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::NotFitted`] before a successful fit.
    pub fn resolve_unknown(&self, category: &str) -> Result<Option<usize>> {
        let model = self.fitted_or_err()?;
        self.apply_policy(model, category)
    }

    fn apply_policy(&self, model: &ClusterModel, category: &str) -> Result<Option<usize>> {
        match self.handle_unknown {
            HandleUnknown::ForceLinkage => model.resolve(category).map(Some),
            HandleUnknown::ImputeNan => Ok(None),
        }
    }
}

impl CategoricalEncoder for StringAgglomerativeEncoder {
    type Output = ClusterLabels;

    /// Clusters the distinct values of the single text column.
    ///
    /// The previous model is replaced only if fitting succeeds.
    fn fit(&mut self, x: &DataFrame) -> Result<()> {
        let values = x.single_text_column()?;
        let model = ClusterModel::fit(values, &self.settings)?;
        self.model = Some(model);
        Ok(())
    }

    /// Labels every row; each distinct unseen value is resolved once.
    fn transform(&self, x: &DataFrame) -> Result<ClusterLabels> {
        let values = x.single_text_column()?;
        let model = self.fitted_or_err()?;

        let mut unknowns: HashMap<&str, Option<usize>> = HashMap::new();
        let mut labels = Vec::with_capacity(values.len());
        for value in values {
            let label = match model.cluster_of(value) {
                Some(id) => Some(id),
                None => match unknowns.get(value.as_str()) {
                    Some(&cached) => cached,
                    None => {
                        let resolved = self.apply_policy(model, value)?;
                        unknowns.insert(value.as_str(), resolved);
                        resolved
                    }
                },
            };
            labels.push(label);
        }

        log::debug!(
            "encoded {} rows, {} distinct unknown categories ({})",
            labels.len(),
            unknowns.len(),
            self.handle_unknown
        );
        Ok(ClusterLabels::from(labels))
    }
}

#[cfg(test)]
#[path = "agglomerative_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_encoder_contract.rs"]
mod tests_encoder_contract;
