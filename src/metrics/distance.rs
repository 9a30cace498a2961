//! Named distance metrics over binary feature vectors.
//!
//! Binary metrics follow the usual contingency-table definitions: for two
//! boolean vectors `u`, `v` let
//!
//! ```text
//! ntt = #{u ∧ v}      ntf = #{u ∧ ¬v}
//! nft = #{¬u ∧ v}     nff = #{¬u ∧ ¬v}
//! ```
//!
//! | metric          | distance                                   |
//! |-----------------|--------------------------------------------|
//! | dice            | (ntf + nft) / (2·ntt + ntf + nft)          |
//! | jaccard         | (ntf + nft) / (ntt + ntf + nft)            |
//! | hamming         | (ntf + nft) / n                            |
//! | rogerstanimoto  | R / (ntt + nff + R),  R = 2(ntf + nft)     |
//! | russellrao      | (n − ntt) / n                              |
//! | sokalmichener   | R / (ntt + nff + R),  R = 2(ntf + nft)     |
//! | sokalsneath     | R / (ntt + R),        R = 2(ntf + nft)     |
//! | yule            | 2·ntf·nft / (ntt·nff + ntf·nft)            |
//!
//! Numeric metrics (`euclidean`, `sqeuclidean`, `cityblock`, `cosine`) treat
//! `true` as 1.0.
//!
//! Any 0/0 ratio evaluates to 0.0: two vectors with no n-grams at all are
//! considered identical rather than producing NaN.
//!
//! # Examples
//!
//! ```
//! use aprender_dirtycat::metrics::Metric;
//!
//! let metric: Metric = "dice".parse().expect("supported metric");
//! let d = metric.distance(&[true, true, false], &[true, false, true]);
//! assert!((d - 0.5).abs() < 1e-12);
//! ```

use crate::error::{EncoderError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance metric between two binary feature vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Dice dissimilarity.
    #[default]
    Dice,
    /// Jaccard dissimilarity.
    Jaccard,
    /// Fraction of disagreeing positions.
    Hamming,
    /// Rogers–Tanimoto dissimilarity.
    RogersTanimoto,
    /// Russell–Rao dissimilarity.
    RussellRao,
    /// Sokal–Michener dissimilarity.
    SokalMichener,
    /// Sokal–Sneath dissimilarity.
    SokalSneath,
    /// Yule dissimilarity.
    Yule,
    /// Euclidean (L2) distance.
    Euclidean,
    /// Squared Euclidean distance.
    SqEuclidean,
    /// Manhattan (L1) distance.
    Cityblock,
    /// One minus cosine similarity.
    Cosine,
}

const SUPPORTED: &str = "one of dice, jaccard, hamming, rogerstanimoto, russellrao, \
     sokalmichener, sokalsneath, yule, euclidean, sqeuclidean, cityblock, cosine";

impl Metric {
    /// All supported metrics.
    pub const ALL: [Metric; 12] = [
        Metric::Dice,
        Metric::Jaccard,
        Metric::Hamming,
        Metric::RogersTanimoto,
        Metric::RussellRao,
        Metric::SokalMichener,
        Metric::SokalSneath,
        Metric::Yule,
        Metric::Euclidean,
        Metric::SqEuclidean,
        Metric::Cityblock,
        Metric::Cosine,
    ];

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Metric::Dice => "dice",
            Metric::Jaccard => "jaccard",
            Metric::Hamming => "hamming",
            Metric::RogersTanimoto => "rogerstanimoto",
            Metric::RussellRao => "russellrao",
            Metric::SokalMichener => "sokalmichener",
            Metric::SokalSneath => "sokalsneath",
            Metric::Yule => "yule",
            Metric::Euclidean => "euclidean",
            Metric::SqEuclidean => "sqeuclidean",
            Metric::Cityblock => "cityblock",
            Metric::Cosine => "cosine",
        }
    }

    /// Distance between two equally sized binary vectors.
    ///
    /// # Panics
    ///
    /// Debug builds assert that `u` and `v` have the same length.
    #[must_use]
    pub fn distance(self, u: &[bool], v: &[bool]) -> f64 {
        debug_assert_eq!(u.len(), v.len());
        let t = Contingency::count(u, v);
        let n = u.len() as f64;
        let (ntt, ntf, nft, nff) = (t.tt as f64, t.tf as f64, t.ft as f64, t.ff as f64);
        let mismatches = ntf + nft;

        match self {
            Metric::Dice => ratio(mismatches, 2.0 * ntt + mismatches),
            Metric::Jaccard => ratio(mismatches, ntt + mismatches),
            Metric::Hamming => ratio(mismatches, n),
            Metric::RogersTanimoto | Metric::SokalMichener => {
                let r = 2.0 * mismatches;
                ratio(r, ntt + nff + r)
            }
            Metric::RussellRao => ratio(n - ntt, n),
            Metric::SokalSneath => {
                let r = 2.0 * mismatches;
                ratio(r, ntt + r)
            }
            Metric::Yule => {
                let half_r = ntf * nft;
                ratio(2.0 * half_r, ntt * nff + half_r)
            }
            Metric::Euclidean => mismatches.sqrt(),
            Metric::SqEuclidean | Metric::Cityblock => mismatches,
            Metric::Cosine => {
                let norm_u = (ntt + ntf).sqrt();
                let norm_v = (ntt + nft).sqrt();
                if norm_u == 0.0 && norm_v == 0.0 {
                    0.0
                } else if norm_u == 0.0 || norm_v == 0.0 {
                    1.0
                } else {
                    (1.0 - ntt / (norm_u * norm_v)).max(0.0)
                }
            }
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dice" => Ok(Metric::Dice),
            "jaccard" => Ok(Metric::Jaccard),
            "hamming" => Ok(Metric::Hamming),
            "rogerstanimoto" => Ok(Metric::RogersTanimoto),
            "russellrao" => Ok(Metric::RussellRao),
            "sokalmichener" => Ok(Metric::SokalMichener),
            "sokalsneath" => Ok(Metric::SokalSneath),
            "yule" => Ok(Metric::Yule),
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "sqeuclidean" => Ok(Metric::SqEuclidean),
            "cityblock" | "manhattan" | "l1" => Ok(Metric::Cityblock),
            "cosine" => Ok(Metric::Cosine),
            _ => Err(EncoderError::invalid_hyperparameter("metric", s, SUPPORTED)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Contingency {
    tt: usize,
    tf: usize,
    ft: usize,
    ff: usize,
}

impl Contingency {
    fn count(u: &[bool], v: &[bool]) -> Self {
        let mut t = Self::default();
        for (&a, &b) in u.iter().zip(v) {
            match (a, b) {
                (true, true) => t.tt += 1,
                (true, false) => t.tf += 1,
                (false, true) => t.ft += 1,
                (false, false) => t.ff += 1,
            }
        }
        t
    }
}

#[inline]
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Condensed pairwise distances between the rows of `x`.
///
/// Entry for `i < j` lives at `n*i - i*(i+1)/2 + (j - i - 1)`, the layout
/// produced by `squareform` on a symmetric matrix.
#[must_use]
pub fn pairwise_condensed(x: &Matrix<bool>, metric: Metric) -> Vec<f64> {
    let n = x.n_rows();
    let mut out = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            out.push(metric.distance(x.row(i), x.row(j)));
        }
    }
    out
}

/// Distances between every row of `a` and every row of `b`.
///
/// # Errors
///
/// Returns an error if `a` and `b` have different feature widths.
pub fn pairwise(a: &Matrix<bool>, b: &Matrix<bool>, metric: Metric) -> Result<Matrix<f64>> {
    if a.n_cols() != b.n_cols() {
        return Err(EncoderError::dimension_mismatch(
            "n_features",
            b.n_cols(),
            a.n_cols(),
        ));
    }

    let mut out = Matrix::zeros(a.n_rows(), b.n_rows());
    for i in 0..a.n_rows() {
        let row = out.row_mut(i);
        for (j, d) in row.iter_mut().enumerate() {
            *d = metric.distance(a.row(i), b.row(j));
        }
    }
    Ok(out)
}

/// Expands a condensed distance vector into a symmetric `n × n` matrix.
///
/// # Errors
///
/// Returns an error if `condensed.len() != n*(n-1)/2`.
pub fn squareform(condensed: &[f64], n: usize) -> Result<Matrix<f64>> {
    let expected = n * n.saturating_sub(1) / 2;
    if condensed.len() != expected {
        return Err(EncoderError::dimension_mismatch(
            "condensed length",
            expected,
            condensed.len(),
        ));
    }

    let mut out = Matrix::zeros(n, n);
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            out.set(i, j, condensed[k]);
            out.set(j, i, condensed[k]);
            k += 1;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "distance_tests.rs"]
mod tests;
