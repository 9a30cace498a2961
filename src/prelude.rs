//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use aprender_dirtycat::prelude::*;
//! ```

pub use crate::cluster::{Criterion, LinkageMethod};
pub use crate::data::DataFrame;
pub use crate::metrics::Metric;
pub use crate::preprocessing::{
    ClusterLabels, HandleUnknown, StringAgglomerativeEncoder, StringDistanceEncoder,
};
pub use crate::primitives::Matrix;
pub use crate::traits::CategoricalEncoder;
