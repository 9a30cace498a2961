//! Encoder configuration.
//!
//! String-valued options are kept as strings so a configuration can be
//! deserialized from any serde format; they are parsed into closed enums
//! exactly once, when an encoder is built with `from_config`.

use crate::cluster::{Criterion, LinkageMethod};
use crate::error::{EncoderError, Result};
use crate::metrics::Metric;
use crate::text::ngram::CharNgramVectorizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy for categories that were not seen during `fit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Assign the unknown to the nearest cluster under the linkage method.
    #[default]
    #[serde(rename = "force linkage")]
    ForceLinkage,
    /// Emit a missing value.
    #[serde(rename = "impute nan")]
    ImputeNan,
}

impl HandleUnknown {
    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            HandleUnknown::ForceLinkage => "force linkage",
            HandleUnknown::ImputeNan => "impute nan",
        }
    }
}

impl fmt::Display for HandleUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HandleUnknown {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "force linkage" => Ok(HandleUnknown::ForceLinkage),
            "impute nan" => Ok(HandleUnknown::ImputeNan),
            _ => Err(EncoderError::invalid_hyperparameter(
                "handle_unknown",
                s,
                "one of force linkage, impute nan",
            )),
        }
    }
}

fn default_metric() -> String {
    Metric::default().name().to_string()
}

fn default_linkage_method() -> String {
    LinkageMethod::default().name().to_string()
}

fn default_criterion() -> String {
    Criterion::default().name().to_string()
}

fn default_handle_unknown() -> String {
    HandleUnknown::default().name().to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 3)
}

fn default_lowercase() -> bool {
    true
}

fn default_n_components() -> usize {
    2
}

/// Configuration for [`StringAgglomerativeEncoder`](super::StringAgglomerativeEncoder).
///
/// `t` is required; every other field falls back to its default when absent.
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::preprocessing::{AgglomerativeConfig, StringAgglomerativeEncoder};
///
/// let mut config = AgglomerativeConfig::new(3.0);
/// config.linkage_method = "complete".to_string();
///
/// let encoder = StringAgglomerativeEncoder::from_config(&config).expect("valid config");
/// assert_eq!(encoder.t(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgglomerativeConfig {
    /// Number of clusters (`maxclust`) or cut height (`distance`).
    pub t: f64,
    /// Distance metric name.
    #[serde(default = "default_metric")]
    pub metric: String,
    /// `average`, `complete` or `single`.
    #[serde(default = "default_linkage_method")]
    pub linkage_method: String,
    /// Inclusive character n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Lowercase strings before extracting n-grams.
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    /// `maxclust` or `distance`.
    #[serde(default = "default_criterion")]
    pub criterion: String,
    /// `force linkage` or `impute nan`.
    #[serde(default = "default_handle_unknown")]
    pub handle_unknown: String,
}

impl AgglomerativeConfig {
    /// Creates a configuration with threshold `t` and default options.
    #[must_use]
    pub fn new(t: f64) -> Self {
        Self {
            t,
            metric: default_metric(),
            linkage_method: default_linkage_method(),
            ngram_range: default_ngram_range(),
            lowercase: default_lowercase(),
            criterion: default_criterion(),
            handle_unknown: default_handle_unknown(),
        }
    }

    /// Parses and validates every option.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidHyperparameter`] for the first option
    /// that is unsupported or out of range.
    pub(crate) fn parse(
        &self,
    ) -> Result<(Metric, LinkageMethod, Criterion, HandleUnknown)> {
        let metric: Metric = self.metric.parse()?;
        let linkage_method: LinkageMethod = self.linkage_method.parse()?;
        let criterion: Criterion = self.criterion.parse()?;
        let handle_unknown: HandleUnknown = self.handle_unknown.parse()?;
        CharNgramVectorizer::validate_range(self.ngram_range)?;
        criterion.validate_threshold(self.t)?;
        Ok((metric, linkage_method, criterion, handle_unknown))
    }
}

/// Configuration for [`StringDistanceEncoder`](super::StringDistanceEncoder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Embedding width.
    #[serde(default = "default_n_components")]
    pub n_components: usize,
    /// Distance metric name.
    #[serde(default = "default_metric")]
    pub metric: String,
    /// Inclusive character n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Lowercase strings before extracting n-grams.
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            n_components: default_n_components(),
            metric: default_metric(),
            ngram_range: default_ngram_range(),
            lowercase: default_lowercase(),
        }
    }
}

impl DistanceConfig {
    pub(crate) fn parse(&self) -> Result<Metric> {
        if self.n_components == 0 {
            return Err(EncoderError::invalid_hyperparameter(
                "n_components",
                self.n_components,
                "a positive integer",
            ));
        }
        CharNgramVectorizer::validate_range(self.ngram_range)?;
        self.metric.parse()
    }
}
