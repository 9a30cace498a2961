//! Truncated singular value decomposition.
//!
//! Projects data onto its top `k` right singular vectors without centering,
//! so it works directly on distance or count matrices.
//!
//! ```text
//! X ≈ U_k Σ_k V_kᵀ        transform(X) = X V_k
//! ```
//!
//! # Example
//!
//! ```
//! use aprender_dirtycat::decomposition::TruncatedSvd;
//! use aprender_dirtycat::primitives::Matrix;
//!
//! let x = Matrix::from_vec(3, 3, vec![
//!     0.0, 0.2, 1.0,
//!     0.2, 0.0, 1.0,
//!     1.0, 1.0, 0.0,
//! ]).expect("valid matrix dimensions");
//!
//! let mut svd = TruncatedSvd::new(2);
//! let embedded = svd.fit_transform(&x).expect("fit_transform should succeed");
//! assert_eq!(embedded.shape(), (3, 2));
//! ```

use crate::error::{EncoderError, Result};
use crate::primitives::Matrix;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Dimensionality reduction by truncated SVD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruncatedSvd {
    /// Number of singular triplets to keep.
    n_components: usize,
    /// Right singular vectors as rows (`n_components × n_features`).
    components: Option<Matrix<f64>>,
    /// Top singular values, descending.
    singular_values: Option<Vec<f64>>,
    /// Share of total feature variance captured by each component.
    explained_variance_ratio: Option<Vec<f64>>,
}

impl TruncatedSvd {
    /// Creates a new `TruncatedSvd` keeping `n_components` components.
    #[must_use]
    pub fn new(n_components: usize) -> Self {
        Self {
            n_components,
            components: None,
            singular_values: None,
            explained_variance_ratio: None,
        }
    }

    /// Returns the configured number of components.
    #[must_use]
    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Returns the components (one right singular vector per row).
    ///
    /// # Panics
    ///
    /// Panics if not fitted.
    #[must_use]
    pub fn components(&self) -> &Matrix<f64> {
        self.components
            .as_ref()
            .expect("TruncatedSvd not fitted. Call fit() first.")
    }

    /// Returns the singular values of the kept components, descending.
    ///
    /// # Panics
    ///
    /// Panics if not fitted.
    #[must_use]
    pub fn singular_values(&self) -> &[f64] {
        self.singular_values
            .as_ref()
            .expect("TruncatedSvd not fitted. Call fit() first.")
    }

    /// Returns the explained variance ratio of each component.
    ///
    /// # Panics
    ///
    /// Panics if not fitted.
    #[must_use]
    pub fn explained_variance_ratio(&self) -> &[f64] {
        self.explained_variance_ratio
            .as_ref()
            .expect("TruncatedSvd not fitted. Call fit() first.")
    }

    /// Returns true if the model has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.components.is_some()
    }

    /// Computes the top right singular vectors of `x`.
    ///
    /// Each component is sign-normalized so that its largest-magnitude entry
    /// is positive, which makes the output independent of the solver's sign
    /// choice.
    ///
    /// # Errors
    ///
    /// Returns an error if `n_components` is 0 or exceeds
    /// `min(n_samples, n_features)`, or if the decomposition does not converge.
    pub fn fit(&mut self, x: &Matrix<f64>) -> Result<()> {
        let (n_samples, n_features) = x.shape();
        let max_rank = n_samples.min(n_features);
        if self.n_components == 0 || self.n_components > max_rank {
            return Err(EncoderError::invalid_hyperparameter(
                "n_components",
                self.n_components,
                &format!("1 <= n_components <= min(n_samples, n_features) = {max_rank}"),
            ));
        }

        let m = DMatrix::from_row_slice(n_samples, n_features, x.as_slice());
        let svd = m
            .try_svd(false, true, f64::EPSILON, 0)
            .ok_or_else(|| EncoderError::from("SVD failed to converge"))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| EncoderError::from("SVD did not produce right singular vectors"))?;
        let sigma = svd.singular_values;

        let mut order: Vec<usize> = (0..sigma.len()).collect();
        order.sort_by(|&a, &b| {
            sigma[b]
                .partial_cmp(&sigma[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut components = Matrix::zeros(self.n_components, n_features);
        let mut singular_values = Vec::with_capacity(self.n_components);
        for (i, &idx) in order.iter().take(self.n_components).enumerate() {
            singular_values.push(sigma[idx]);
            let row = components.row_mut(i);
            for (j, value) in row.iter_mut().enumerate() {
                *value = v_t[(idx, j)];
            }
            flip_sign(row);
        }

        let explained_variance_ratio = variance_ratio(x, &components)?;

        self.components = Some(components);
        self.singular_values = Some(singular_values);
        self.explained_variance_ratio = Some(explained_variance_ratio);
        Ok(())
    }

    /// Projects `x` onto the fitted components.
    ///
    /// # Errors
    ///
    /// Returns an error if not fitted or if the feature width differs.
    pub fn transform(&self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        let components = self.components.as_ref().ok_or(EncoderError::NotFitted {
            estimator: "TruncatedSvd",
        })?;
        project(x, components)
    }

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform(&mut self, x: &Matrix<f64>) -> Result<Matrix<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}

fn project(x: &Matrix<f64>, components: &Matrix<f64>) -> Result<Matrix<f64>> {
    if x.n_cols() != components.n_cols() {
        return Err(EncoderError::dimension_mismatch(
            "n_features",
            components.n_cols(),
            x.n_cols(),
        ));
    }
    Ok(x.matmul(&components.transpose())?)
}

/// Negates `v` if its largest-magnitude entry is negative.
fn flip_sign(v: &mut [f64]) {
    let pivot = v
        .iter()
        .copied()
        .fold(0.0_f64, |best, x| if x.abs() > best.abs() { x } else { best });
    if pivot < 0.0 {
        v.iter_mut().for_each(|x| *x = -*x);
    }
}

/// Population variance of each projected column over total feature variance.
fn variance_ratio(x: &Matrix<f64>, components: &Matrix<f64>) -> Result<Vec<f64>> {
    let projected = project(x, components)?;
    let total: f64 = (0..x.n_cols()).map(|j| variance(&x.column(j))).sum();

    Ok((0..projected.n_cols())
        .map(|j| {
            let v = variance(&projected.column(j));
            if total > 0.0 {
                v / total
            } else {
                0.0
            }
        })
        .collect())
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}

#[cfg(test)]
#[path = "svd_tests.rs"]
mod tests;
