//! Clustering algorithms.
//!
//! Agglomerative (hierarchical) clustering over a precomputed distance
//! structure, plus flat-cluster extraction from the resulting tree.
//!
//! ## Linkage
//!
//! Start with every item in its own cluster and repeatedly merge the two
//! closest clusters. The linkage method defines "closest" for groups:
//!
//! ```text
//! single:   d(A, B) = min  { d(a, b) : a ∈ A, b ∈ B }
//! complete: d(A, B) = max  { d(a, b) : a ∈ A, b ∈ B }
//! average:  d(A, B) = mean { d(a, b) : a ∈ A, b ∈ B }
//! ```
//!
//! All three are monotone: merge heights never decrease, so cutting the tree
//! at a height is the same as applying a prefix of the merges.
//!
//! ## Usage
//!
//! ```rust
//! use aprender_dirtycat::cluster::{fcluster, linkage, Criterion, LinkageMethod};
//!
//! // Condensed distances for 3 items: d(0,1), d(0,2), d(1,2)
//! let condensed = [0.1, 0.9, 0.8];
//! let tree = linkage(&condensed, 3, LinkageMethod::Average).unwrap();
//! let labels = fcluster(&tree, 2.0, Criterion::MaxClust).unwrap();
//! // Leaf 2 sits left of the {0, 1} merge, so it is reached first.
//! assert_eq!(labels, vec![2, 2, 1]);
//! ```

mod hierarchy;

pub use hierarchy::{fcluster, linkage, Criterion, LinkageMethod, LinkageStep, LinkageTree};
