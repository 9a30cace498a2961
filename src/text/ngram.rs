//! Character n-gram vectorization.
//!
//! Turns each string into a vector of n-gram counts over a vocabulary learned
//! at fit time. Misspellings of the same word share most of their character
//! n-grams, which is what makes set-based distances such as Dice meaningful on
//! dirty categories.
//!
//! # Analyzer
//!
//! 1. Optionally lowercase.
//! 2. Collapse runs of two or more whitespace characters to a single space.
//! 3. Emit every contiguous window of `n` characters for `n` in
//!    `min_n..=max_n` (windows longer than the string are skipped).
//!
//! # Examples
//!
//! ```
//! use aprender_dirtycat::text::ngram::CharNgramVectorizer;
//!
//! let mut vectorizer = CharNgramVectorizer::new().with_ngram_range(2, 2);
//! let counts = vectorizer.fit_transform(&["abab"]).expect("fit_transform should succeed");
//!
//! // "ab", "ba"
//! assert_eq!(vectorizer.vocabulary_size(), 2);
//! assert_eq!(counts.row(0), &[2.0, 1.0]);
//! ```

use crate::error::{EncoderError, Result};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Character n-gram count vectorizer.
///
/// The vocabulary is sorted lexicographically, so feature `i` is the `i`-th
/// smallest n-gram. Once fitted the vocabulary is frozen: n-grams not seen at
/// fit time are ignored by [`transform`](Self::transform).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharNgramVectorizer {
    /// Inclusive (min_n, max_n).
    ngram_range: (usize, usize),
    /// Lowercase before extracting n-grams.
    lowercase: bool,
    /// n-gram -> feature index.
    vocabulary: HashMap<String, usize>,
}

impl Default for CharNgramVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CharNgramVectorizer {
    /// Creates a vectorizer with `ngram_range = (1, 3)` and lowercasing on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ngram_range: (1, 3),
            lowercase: true,
            vocabulary: HashMap::new(),
        }
    }

    /// Sets the inclusive n-gram range.
    ///
    /// The range is validated by [`fit`](Self::fit).
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Sets whether to lowercase before tokenizing.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Returns the configured n-gram range.
    #[must_use]
    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Returns whether input is lowercased.
    #[must_use]
    pub fn lowercase(&self) -> bool {
        self.lowercase
    }

    /// Checks that `(min_n, max_n)` is a usable n-gram range.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_n == 0` or `min_n > max_n`.
    pub fn validate_range(ngram_range: (usize, usize)) -> Result<()> {
        let (min_n, max_n) = ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(EncoderError::invalid_hyperparameter(
                "ngram_range",
                format!("({min_n}, {max_n})"),
                "1 <= min_n <= max_n",
            ));
        }
        Ok(())
    }

    /// Extracts the n-grams of a single document, in order of appearance.
    #[must_use]
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let text = if self.lowercase {
            doc.to_lowercase()
        } else {
            doc.to_string()
        };
        let chars = collapse_whitespace(&text);

        let (min_n, max_n) = self.ngram_range;
        let mut ngrams = Vec::new();
        for n in min_n..=max_n.min(chars.len()) {
            ngrams.extend(chars.windows(n).map(|w| w.iter().collect::<String>()));
        }
        ngrams
    }

    /// Learns the n-gram vocabulary.
    ///
    /// # Errors
    ///
    /// Returns an error if `documents` is empty, the n-gram range is invalid,
    /// or no document yields a single n-gram.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        Self::validate_range(self.ngram_range)?;
        if documents.is_empty() {
            return Err(EncoderError::empty_input("documents"));
        }

        let terms: BTreeSet<String> = documents
            .iter()
            .flat_map(|doc| self.analyze(doc.as_ref()))
            .collect();

        if terms.is_empty() {
            return Err(EncoderError::invalid_input(
                "empty vocabulary; documents contain no characters",
            ));
        }

        self.vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();

        Ok(())
    }

    /// Counts vocabulary n-grams for each document.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectorizer is not fitted.
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Matrix<f64>> {
        self.ensure_fitted()?;

        let vocab_size = self.vocabulary.len();
        let mut data = vec![0.0; documents.len() * vocab_size];

        for (doc_idx, doc) in documents.iter().enumerate() {
            for term in self.analyze(doc.as_ref()) {
                if let Some(&idx) = self.vocabulary.get(&term) {
                    data[doc_idx * vocab_size + idx] += 1.0;
                }
            }
        }

        Ok(Matrix::from_vec(documents.len(), vocab_size, data)?)
    }

    /// Like [`transform`](Self::transform) but records presence instead of counts.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectorizer is not fitted.
    pub fn transform_binary<S: AsRef<str>>(&self, documents: &[S]) -> Result<Matrix<bool>> {
        Ok(self.transform(documents)?.map(|count| count > 0.0))
    }

    /// Binary presence vector for one string.
    ///
    /// # Errors
    ///
    /// Returns an error if the vectorizer is not fitted.
    pub fn vectorize_one(&self, doc: &str) -> Result<Vec<bool>> {
        self.ensure_fitted()?;

        let mut features = vec![false; self.vocabulary.len()];
        for term in self.analyze(doc) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                features[idx] = true;
            }
        }
        Ok(features)
    }

    /// Learns the vocabulary and returns the count matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Matrix<f64>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Returns the learned vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Returns the vocabulary size (feature width).
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Returns the n-grams ordered by feature index.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names = vec![""; self.vocabulary.len()];
        for (term, &idx) in &self.vocabulary {
            names[idx] = term.as_str();
        }
        names
    }

    /// Returns true if the vocabulary has been learned.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    fn ensure_fitted(&self) -> Result<()> {
        if self.is_fitted() {
            Ok(())
        } else {
            Err(EncoderError::NotFitted {
                estimator: "CharNgramVectorizer",
            })
        }
    }
}

/// Splits into chars, replacing each run of 2+ whitespace chars with one space.
fn collapse_whitespace(text: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::with_capacity(text.len());
    let mut run: Vec<char> = Vec::new();

    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_whitespace(&mut out, &mut run);
        out.push(c);
    }
    flush_whitespace(&mut out, &mut run);
    out
}

fn flush_whitespace(out: &mut Vec<char>, run: &mut Vec<char>) {
    match run.len() {
        0 => {}
        1 => out.push(run[0]),
        _ => out.push(' '),
    }
    run.clear();
}

#[cfg(test)]
#[path = "ngram_tests.rs"]
mod tests;
