//! # Error Types
//!
//! All failures the converter can report while turning TextGrid files into rows.
//!
//! ## Error Kinds
//! - `Io` - a file or directory could not be read or written
//! - `Encoding` - the raw bytes are not valid in the configured encoding
//! - `ParseError` - the TextGrid text is malformed (with line number)
//! - `StructureError` - a tier is missing or has the wrong kind
//! - `ConsistencyError` - formant points and vowel symbols do not pair up
//! - `ConfigError` - invalid configuration file or option
//!
//! Structural, encoding and parse errors come from reading a file. Consistency
//! errors are raised by the alignment itself and are the only kind that means
//! the annotation is readable but scientifically unusable.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    /// I/O failure on a specific path.
    ///
    /// # Example
    /// ```
    /// # use formant_table::TableError;
    /// let err = TableError::Io {
    ///     path: "out.csv".into(),
    ///     source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
    /// };
    /// assert_eq!(err.to_string(), "I/O error on 'out.csv': disk full");
    /// ```
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Malformed TextGrid text.
    ///
    /// # Example
    /// ```
    /// # use formant_table::TableError;
    /// let err = TableError::ParseError {
    ///     line: 12,
    ///     message: "Expected a number, found a string".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error at line 12: Expected a number, found a string");
    /// ```
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A tier needed by the converter is missing or of the wrong kind.
    #[error("Tier {position} ({tier}): {message}")]
    StructureError {
        tier: &'static str,
        position: usize,
        message: String,
    },

    /// Vowel symbols and formant points could not be paired one-to-one.
    ///
    /// # Example
    /// ```
    /// # use formant_table::TableError;
    /// let err = TableError::ConsistencyError {
    ///     sample: "12".to_string(),
    ///     message: "formant count (4) does not match symbol count (5)".to_string(),
    /// };
    /// assert!(err.is_consistency());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Inconsistent sample '12': formant count (4) does not match symbol count (5)"
    /// );
    /// ```
    #[error("Inconsistent sample '{sample}': {message}")]
    ConsistencyError { sample: String, message: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl TableError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors raised by symbol/formant alignment rather than by reading.
    pub fn is_consistency(&self) -> bool {
        matches!(self, TableError::ConsistencyError { .. })
    }
}
