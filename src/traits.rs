//! Core traits for categorical encoders.
//!
//! These traits define the API contract shared by every encoder.

use crate::data::DataFrame;
use crate::error::Result;

/// Trait for transformers that encode a single categorical text column.
///
/// Follows the fit/transform convention: `fit` learns state from training
/// data, `transform` maps rows using only state from the most recent
/// successful `fit`.
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::prelude::*;
///
/// let train = DataFrame::from_strings("city", &["Paris", "paris", "Lyon"]).unwrap();
///
/// let mut encoder = StringAgglomerativeEncoder::new(2.0);
/// let labels = encoder.fit_transform(&train).unwrap();
/// assert_eq!(labels.len(), 3);
/// assert_eq!(labels[0], labels[1]);
/// ```
pub trait CategoricalEncoder {
    /// Encoded representation of a column.
    type Output;

    /// Fits the encoder to the training column.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a single text column or if
    /// fitting fails. Previously fitted state is left untouched on error.
    fn fit(&mut self, x: &DataFrame) -> Result<()>;

    /// Encodes every row of `x`, preserving row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the encoder is not fitted or the input is invalid.
    fn transform(&self, x: &DataFrame) -> Result<Self::Output>;

    /// Fits and transforms in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    fn fit_transform(&mut self, x: &DataFrame) -> Result<Self::Output> {
        self.fit(x)?;
        self.transform(x)
    }
}
