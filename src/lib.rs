//! Dirty-category string encoders in pure Rust.
//!
//! Turns noisy, inconsistently spelled string categories into numeric
//! features by comparing strings through their character n-grams.
//!
//! # Quick Start
//!
//! ```
//! use aprender_dirtycat::prelude::*;
//!
//! let train = DataFrame::from_strings("employer", &[
//!     "Acme Corp",
//!     "ACME Corp.",
//!     "Globex",
//!     "Globex Inc",
//! ]).unwrap();
//!
//! // Two clusters; unseen spellings join the closest one.
//! let mut encoder = StringAgglomerativeEncoder::new(2.0);
//! encoder.fit(&train).unwrap();
//!
//! let test = DataFrame::from_strings("employer", &["Acme Corporation", "Globex"]).unwrap();
//! let labels = encoder.transform(&test).unwrap();
//! assert_eq!(labels[0], encoder.cluster_of("Acme Corp"));
//! assert_eq!(labels[1], encoder.cluster_of("Globex"));
//!
//! // Or embed every row into two dense dimensions.
//! let mut embedder = StringDistanceEncoder::new(2);
//! let embedded = embedder.fit_transform(&train).unwrap();
//! assert_eq!(embedded.shape(), (4, 2));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Matrix type
//! - [`data`]: DataFrame for named columns
//! - [`text`]: Character n-gram vectorization
//! - [`metrics`]: Distances between n-gram vectors (Dice, Jaccard, ...)
//! - [`cluster`]: Hierarchical linkage and flat clusters
//! - [`decomposition`]: Truncated SVD
//! - [`preprocessing`]: The string encoders

pub mod cluster;
pub mod data;
pub mod decomposition;
pub mod error;
pub mod metrics;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod text;
pub mod traits;

pub use error::{EncoderError, Result};
pub use primitives::Matrix;
pub use traits::CategoricalEncoder;
