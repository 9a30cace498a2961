//! Text processing for string categories.
//!
//! - [`ngram`]: character n-gram bag-of-features vectorizer

pub mod ngram;
