//! Encoders for dirty categorical string columns.
//!
//! Real-world categories are rarely clean: "Police Officer", "police officer"
//! and "Police Oficer" are one category to a human and three to a one-hot
//! encoder. The encoders here compare strings through their character
//! n-grams so that near-duplicates end up close together.
//!
//! - [`StringAgglomerativeEncoder`]: one cluster label per row
//! - [`StringDistanceEncoder`]: a dense embedding per row
//!
//! # Example
//!
//! ```
//! use aprender_dirtycat::prelude::*;
//!
//! let train = DataFrame::from_strings("job", &[
//!     "Police Officer",
//!     "police officer",
//!     "Firefighter",
//!     "Fire fighter",
//! ]).expect("single text column");
//!
//! let mut encoder = StringAgglomerativeEncoder::new(2.0);
//! encoder.fit(&train).expect("fit should succeed");
//!
//! let test = DataFrame::from_strings("job", &["Police Oficer"]).expect("single text column");
//! let labels = encoder.transform(&test).expect("transform should succeed");
//! assert_eq!(labels[0], encoder.cluster_of("Police Officer"));
//! ```

mod agglomerative;
mod cluster_model;
mod config;
mod string_distance;

pub use agglomerative::{ClusterLabels, StringAgglomerativeEncoder};
pub use cluster_model::ClusterModel;
pub use config::{AgglomerativeConfig, DistanceConfig, HandleUnknown};
pub use string_distance::StringDistanceEncoder;
