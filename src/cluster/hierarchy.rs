//! Hierarchical linkage and flat-cluster extraction.
//!
//! The tree uses the usual linkage-matrix conventions: leaves are
//! `0..n`, the cluster created by merge `i` gets id `n + i`, and each merge
//! records `(left, right, height, size)` with `left < right`.

use crate::error::{EncoderError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule for measuring the distance between two groups of items.
///
/// The same rule drives both the agglomeration at fit time and the
/// reduction used to assign unseen items to an existing cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkageMethod {
    /// Mean pairwise distance (UPGMA).
    #[default]
    Average,
    /// Maximum pairwise distance.
    Complete,
    /// Minimum pairwise distance.
    Single,
}

impl LinkageMethod {
    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            LinkageMethod::Average => "average",
            LinkageMethod::Complete => "complete",
            LinkageMethod::Single => "single",
        }
    }

    /// Reduces item-to-member distances to one item-to-group distance.
    ///
    /// Returns `f64::INFINITY` for an empty slice.
    #[must_use]
    pub fn reduce(self, distances: &[f64]) -> f64 {
        if distances.is_empty() {
            return f64::INFINITY;
        }
        match self {
            LinkageMethod::Average => distances.iter().sum::<f64>() / distances.len() as f64,
            LinkageMethod::Complete => distances.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            LinkageMethod::Single => distances.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }

    /// Lance–Williams update: distance from `k` to the union of `i` and `j`.
    #[inline]
    fn merged_distance(self, d_ik: f64, d_jk: f64, size_i: usize, size_j: usize) -> f64 {
        match self {
            LinkageMethod::Average => {
                let (si, sj) = (size_i as f64, size_j as f64);
                (si * d_ik + sj * d_jk) / (si + sj)
            }
            LinkageMethod::Complete => d_ik.max(d_jk),
            LinkageMethod::Single => d_ik.min(d_jk),
        }
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LinkageMethod {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" => Ok(LinkageMethod::Average),
            "complete" => Ok(LinkageMethod::Complete),
            "single" => Ok(LinkageMethod::Single),
            _ => Err(EncoderError::invalid_hyperparameter(
                "linkage_method",
                s,
                "one of average, complete, single",
            )),
        }
    }
}

/// How a linkage tree is cut into flat clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// `t` is the number of clusters to form.
    #[default]
    MaxClust,
    /// `t` is a height: merges at or below it are kept.
    Distance,
}

impl Criterion {
    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Criterion::MaxClust => "maxclust",
            Criterion::Distance => "distance",
        }
    }

    /// Checks that `t` is meaningful under this criterion.
    ///
    /// # Errors
    ///
    /// `maxclust` needs an integral `t >= 1`; `distance` needs a finite `t >= 0`.
    pub fn validate_threshold(self, t: f64) -> Result<()> {
        let ok = match self {
            Criterion::MaxClust => t.is_finite() && t >= 1.0 && t.fract() == 0.0,
            Criterion::Distance => t.is_finite() && t >= 0.0,
        };
        if ok {
            Ok(())
        } else {
            let constraint = match self {
                Criterion::MaxClust => "an integer >= 1 under criterion maxclust",
                Criterion::Distance => "a finite value >= 0 under criterion distance",
            };
            Err(EncoderError::invalid_hyperparameter("t", t, constraint))
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Criterion {
    type Err = EncoderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maxclust" => Ok(Criterion::MaxClust),
            "distance" => Ok(Criterion::Distance),
            _ => Err(EncoderError::invalid_hyperparameter(
                "criterion",
                s,
                "one of maxclust, distance",
            )),
        }
    }
}

/// One merge of the agglomeration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkageStep {
    /// Smaller id of the merged pair.
    pub left: usize,
    /// Larger id of the merged pair.
    pub right: usize,
    /// Linkage distance at which the pair merged.
    pub distance: f64,
    /// Number of leaves in the new cluster.
    pub size: usize,
}

/// Result of hierarchical agglomeration over `n` leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkageTree {
    n_leaves: usize,
    steps: Vec<LinkageStep>,
}

impl LinkageTree {
    /// Number of original observations.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    /// Merges in the order they were performed (`n - 1` of them).
    #[must_use]
    pub fn steps(&self) -> &[LinkageStep] {
        &self.steps
    }

    /// Linkage matrix with rows `[left, right, distance, size]`.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix<f64> {
        let mut m = Matrix::zeros(self.steps.len(), 4);
        for (i, s) in self.steps.iter().enumerate() {
            m.row_mut(i).copy_from_slice(&[
                s.left as f64,
                s.right as f64,
                s.distance,
                s.size as f64,
            ]);
        }
        m
    }

    /// Id of the root node.
    fn root(&self) -> usize {
        if self.n_leaves <= 1 {
            0
        } else {
            2 * self.n_leaves - 2
        }
    }

    /// Children of an internal node.
    fn children(&self, node: usize) -> (usize, usize) {
        let s = &self.steps[node - self.n_leaves];
        (s.left, s.right)
    }

    /// Leaves under `node`, left subtree first.
    fn leaves_under(&self, node: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if id < self.n_leaves {
                leaves.push(id);
            } else {
                let (l, r) = self.children(id);
                stack.push(r);
                stack.push(l);
            }
        }
        leaves
    }
}

/// Agglomerates `n` items given their condensed pairwise distances.
///
/// At every step the closest pair of active clusters is merged; on ties the
/// first pair in row-major scan order wins. Inter-cluster distances are kept
/// current with the Lance–Williams update for `method`.
///
/// # Errors
///
/// Returns an error if `n == 0`, if `condensed.len() != n*(n-1)/2`, or if any
/// distance is negative or not finite.
pub fn linkage(condensed: &[f64], n: usize, method: LinkageMethod) -> Result<LinkageTree> {
    if n == 0 {
        return Err(EncoderError::empty_input("linkage requires at least one item"));
    }
    let expected = n * (n - 1) / 2;
    if condensed.len() != expected {
        return Err(EncoderError::dimension_mismatch(
            "condensed length",
            expected,
            condensed.len(),
        ));
    }
    if condensed.iter().any(|d| !d.is_finite() || *d < 0.0) {
        return Err(EncoderError::invalid_input(
            "distances must be finite and non-negative",
        ));
    }

    let mut dist = vec![0.0; n * n];
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            dist[i * n + j] = condensed[k];
            dist[j * n + i] = condensed[k];
            k += 1;
        }
    }

    // Slot i holds cluster `ids[i]` while `active[i]`.
    let mut active = vec![true; n];
    let mut ids: Vec<usize> = (0..n).collect();
    let mut sizes = vec![1usize; n];
    let mut steps = Vec::with_capacity(n - 1);

    for step in 0..n - 1 {
        let mut best = (usize::MAX, usize::MAX, f64::INFINITY);
        for i in (0..n).filter(|&i| active[i]) {
            for j in ((i + 1)..n).filter(|&j| active[j]) {
                let d = dist[i * n + j];
                if d < best.2 || best.0 == usize::MAX {
                    best = (i, j, d);
                }
            }
        }
        let (a, b, d) = best;

        steps.push(LinkageStep {
            left: ids[a].min(ids[b]),
            right: ids[a].max(ids[b]),
            distance: d,
            size: sizes[a] + sizes[b],
        });

        for other in 0..n {
            if !active[other] || other == a || other == b {
                continue;
            }
            let updated =
                method.merged_distance(dist[a * n + other], dist[b * n + other], sizes[a], sizes[b]);
            dist[a * n + other] = updated;
            dist[other * n + a] = updated;
        }

        active[b] = false;
        sizes[a] += sizes[b];
        ids[a] = n + step;
    }

    Ok(LinkageTree { n_leaves: n, steps })
}

/// Cuts a linkage tree into flat clusters labelled `1..=k`.
///
/// * [`Criterion::MaxClust`]: applies the first `n - min(t, n)` merges, which
///   yields exactly `min(t, n)` clusters.
/// * [`Criterion::Distance`]: applies every merge with height `<= t`.
///
/// Labels are numbered in a pre-order walk from the root (left child first):
/// each flat cluster gets the next label when the walk first reaches it.
///
/// # Errors
///
/// Returns an error if `t` is invalid for `criterion`.
pub fn fcluster(tree: &LinkageTree, t: f64, criterion: Criterion) -> Result<Vec<usize>> {
    criterion.validate_threshold(t)?;

    let n = tree.n_leaves;
    let applied = match criterion {
        Criterion::MaxClust => {
            // validate_threshold guarantees an integral t >= 1.
            let k = (t as usize).min(n);
            n - k
        }
        Criterion::Distance => tree.steps.iter().take_while(|s| s.distance <= t).count(),
    };

    let is_flat = |node: usize| node < n || node - n < applied;

    let mut labels = vec![0usize; n];
    let mut next_label = 1;
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if is_flat(node) {
            for leaf in tree.leaves_under(node) {
                labels[leaf] = next_label;
            }
            next_label += 1;
        } else {
            let (l, r) = tree.children(node);
            stack.push(r);
            stack.push(l);
        }
    }

    Ok(labels)
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests_hierarchy_contract.rs"]
mod tests_hierarchy_contract;
