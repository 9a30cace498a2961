//! `DataFrame` module for named column containers.
//!
//! A minimal table type for feeding encoders. Columns are typed so that
//! encoders can reject anything that is not a single text column.

use crate::error::{EncoderError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DType {
    /// UTF-8 strings.
    Text,
    /// 32-bit floats.
    Numeric,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DType::Text => write!(f, "text"),
            DType::Numeric => write!(f, "numeric"),
        }
    }
}

/// A typed column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// String values.
    Text(Vec<String>),
    /// Numeric values.
    Numeric(Vec<f32>),
}

impl Column {
    /// Builds a text column from anything string-like.
    pub fn text<S: AsRef<str>>(values: &[S]) -> Self {
        Column::Text(values.iter().map(|v| v.as_ref().to_string()).collect())
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Numeric(v) => v.len(),
        }
    }

    /// Returns true if the column holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the column data type.
    #[must_use]
    pub fn dtype(&self) -> DType {
        match self {
            Column::Text(_) => DType::Text,
            Column::Numeric(_) => DType::Numeric,
        }
    }

    /// Returns the values if this is a text column.
    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match self {
            Column::Text(v) => Some(v),
            Column::Numeric(_) => None,
        }
    }
}

/// A minimal `DataFrame` with named, typed columns.
///
/// # Examples
///
/// ```
/// use aprender_dirtycat::data::{Column, DataFrame};
///
/// let df = DataFrame::new(vec![
///     ("city".to_string(), Column::text(&["Paris", "paris", "PARIS "])),
/// ]).expect("DataFrame creation should succeed with valid columns");
/// assert_eq!(df.shape(), (3, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    columns: Vec<(String, Column)>,
    n_rows: usize,
}

impl DataFrame {
    /// Creates a new `DataFrame` from named columns.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no columns, if columns have different
    /// lengths, or if names are empty or duplicated.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self> {
        if columns.is_empty() {
            return Err("DataFrame must have at least one column".into());
        }

        let n_rows = columns[0].1.len();

        for (name, col) in &columns {
            if col.len() != n_rows {
                return Err("All columns must have the same length".into());
            }
            if name.is_empty() {
                return Err("Column names cannot be empty".into());
            }
        }

        let mut names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err("Duplicate column names not allowed".into());
        }

        Ok(Self { columns, n_rows })
    }

    /// Creates a single text-column `DataFrame`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty.
    pub fn from_strings<S: AsRef<str>>(name: &str, values: &[S]) -> Result<Self> {
        Self::new(vec![(name.to_string(), Column::text(values))])
    }

    /// Returns the shape as (`n_rows`, `n_cols`).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    /// Returns a reference to a column by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the column doesn't exist.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| format!("Column not found: {name}").into())
    }

    /// Returns the values of the only column, which must hold text.
    ///
    /// This is the input contract of every encoder in this crate.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::InvalidInput`] if the frame does not have
    /// exactly one column or if that column is not text.
    pub fn single_text_column(&self) -> Result<&[String]> {
        if self.columns.len() != 1 {
            return Err(EncoderError::invalid_input(format!(
                "X must have only one column, found {}",
                self.columns.len()
            )));
        }

        let (name, column) = &self.columns[0];
        column.as_text().ok_or_else(|| {
            EncoderError::invalid_input(format!(
                "column '{name}' must have text dtype, found {}",
                column.dtype()
            ))
        })
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
