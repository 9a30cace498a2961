//! Matrix decomposition.
//!
//! - [`TruncatedSvd`]: rank-k projection onto the top right singular vectors

mod svd;

pub use svd::TruncatedSvd;
