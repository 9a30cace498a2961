//! Distance metrics between n-gram feature vectors.
//!
//! - [`distance`]: named dissimilarities and pairwise distance matrices

pub mod distance;

pub use distance::{pairwise, pairwise_condensed, squareform, Metric};
