//! Core compute primitives.
//!
//! Dense row-major storage shared by the vectorizer, the distance kernels
//! and the SVD projection.

mod matrix;

pub use matrix::Matrix;
