//! Fitted cluster model and unknown-category resolution.
//!
//! A [`ClusterModel`] is built once per `fit` and never mutated afterwards.
//! It owns everything needed to place a string that was not seen during
//! fitting: the frozen vectorizer, the feature vector of every known
//! category, and the flat cluster label of each of them.
//!
//! Resolution mirrors the linkage rule used to build the clusters. The
//! distance from an unknown string to a cluster is the linkage reduction of
//! its distances to the cluster's members (mean for average, max for
//! complete, min for single), and the closest cluster wins.

use crate::cluster::{fcluster, linkage, Criterion, LinkageMethod, LinkageTree};
use crate::error::{EncoderError, Result};
use crate::metrics::{pairwise_condensed, Metric};
use crate::primitives::Matrix;
use crate::text::ngram::CharNgramVectorizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Typed clustering options, already validated or validated by `fit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct ClusterSettings {
    pub(crate) t: f64,
    pub(crate) metric: Metric,
    pub(crate) linkage_method: LinkageMethod,
    pub(crate) ngram_range: (usize, usize),
    pub(crate) lowercase: bool,
    pub(crate) criterion: Criterion,
}

impl ClusterSettings {
    pub(crate) fn validate(&self) -> Result<()> {
        CharNgramVectorizer::validate_range(self.ngram_range)?;
        self.criterion.validate_threshold(self.t)
    }
}

/// Mapping from every training category to a flat cluster id in `1..=K`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterModel {
    /// Sorted, deduplicated training categories.
    categories: Vec<String>,
    /// Cluster id of `categories[i]`.
    labels: Vec<usize>,
    /// Category -> index into `categories`.
    index: HashMap<String, usize>,
    n_clusters: usize,
    vectorizer: CharNgramVectorizer,
    /// Binary n-gram presence, one row per category.
    features: Matrix<bool>,
    tree: LinkageTree,
    metric: Metric,
    linkage_method: LinkageMethod,
}

impl ClusterModel {
    /// Clusters the distinct values of `values`.
    pub(crate) fn fit(values: &[String], settings: &ClusterSettings) -> Result<Self> {
        settings.validate()?;
        if values.is_empty() {
            return Err(EncoderError::empty_input("no categories to cluster"));
        }

        let mut categories = values.to_vec();
        categories.sort();
        categories.dedup();
        let n = categories.len();

        if settings.criterion == Criterion::MaxClust && settings.t > n as f64 {
            log::warn!(
                "t = {} exceeds the number of distinct categories ({n}); \
                 every category gets its own cluster",
                settings.t
            );
        }

        let mut vectorizer = CharNgramVectorizer::new()
            .with_ngram_range(settings.ngram_range.0, settings.ngram_range.1)
            .with_lowercase(settings.lowercase);
        vectorizer.fit(&categories)?;
        let features = vectorizer.transform_binary(&categories)?;

        let condensed = pairwise_condensed(&features, settings.metric);
        let tree = linkage(&condensed, n, settings.linkage_method)?;
        let labels = fcluster(&tree, settings.t, settings.criterion)?;
        let n_clusters = labels.iter().copied().max().unwrap_or(0);

        log::debug!(
            "clustered {n} categories into {n_clusters} clusters \
             ({} n-grams, metric={}, linkage={})",
            vectorizer.vocabulary_size(),
            settings.metric,
            settings.linkage_method
        );

        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        Ok(Self {
            categories,
            labels,
            index,
            n_clusters,
            vectorizer,
            features,
            tree,
            metric: settings.metric,
            linkage_method: settings.linkage_method,
        })
    }

    /// Sorted distinct training categories.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Cluster ids aligned with [`categories`](Self::categories).
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Number of flat clusters `K`.
    #[must_use]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Cluster id of a known category, `None` if it was not seen during fit.
    #[must_use]
    pub fn cluster_of(&self, category: &str) -> Option<usize> {
        self.index.get(category).map(|&i| self.labels[i])
    }

    /// Returns true if `category` was seen during fit.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.index.contains_key(category)
    }

    /// The agglomeration that produced the clusters.
    #[must_use]
    pub fn linkage_tree(&self) -> &LinkageTree {
        &self.tree
    }

    /// The frozen vectorizer.
    #[must_use]
    pub fn vectorizer(&self) -> &CharNgramVectorizer {
        &self.vectorizer
    }

    /// Linkage distance from `category` to every cluster, as `(id, distance)`
    /// pairs ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the model is internally inconsistent.
    pub fn cluster_distances(&self, category: &str) -> Result<Vec<(usize, f64)>> {
        let query = self.vectorizer.vectorize_one(category)?;

        let mut members: Vec<Vec<f64>> = vec![Vec::new(); self.n_clusters];
        for (row, &label) in self.features.iter_rows().zip(&self.labels) {
            members[label - 1].push(self.metric.distance(&query, row));
        }

        Ok(members
            .iter()
            .enumerate()
            .map(|(i, d)| (i + 1, self.linkage_method.reduce(d)))
            .collect())
    }

    /// Nearest cluster of `category`; ties go to the smallest id.
    ///
    /// # Errors
    ///
    /// Returns an error only if the model is internally inconsistent.
    pub fn resolve(&self, category: &str) -> Result<usize> {
        if self.n_clusters == 1 {
            return Ok(1);
        }

        let distances = self.cluster_distances(category)?;
        let (id, distance) = distances
            .into_iter()
            .reduce(|best, candidate| if candidate.1 < best.1 { candidate } else { best })
            .ok_or_else(|| EncoderError::from("cluster model has no clusters"))?;

        log::trace!("resolved unknown category {category:?} to cluster {id} (distance {distance:.4})");
        Ok(id)
    }
}

#[cfg(test)]
#[path = "cluster_model_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_resolver_contract.rs"]
mod tests_resolver_contract;
