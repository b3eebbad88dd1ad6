//! Error types for the bibtex-publist crate

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bibtex-publist operations
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for bibtex-publist
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed BibTeX structure, with location information
    #[error("Parse error at line {}, column {}: {message}", location.line, location.column)]
    ParseError {
        /// Where parsing stopped
        location: Location,
        /// Error message
        message: String,
        /// Source text following the failure point
        snippet: String,
    },

    /// Reference to a `@string` macro that was never defined
    #[error("Undefined string variable '{0}'")]
    UndefinedVariable(String),

    /// A `@string` macro that refers back to itself
    #[error("Circular reference detected in string variables: {0}")]
    CircularReference(String),

    /// A `year` field that does not parse as an integer
    #[error("Invalid year '{value}' in entry '{key}'")]
    InvalidYear {
        /// Citation key of the offending entry
        key: String,
        /// The raw year text
        value: String,
    },

    /// The bibliography source could not be read
    #[error("Failed to read '{}': {source}", path.display())]
    SourceRead {
        /// Source file path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The rendered document could not be written
    #[error("Failed to write '{}': {source}", path.display())]
    OutputWrite {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Invalid or unreadable configuration file
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error stems from the bibliography contents rather than IO
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::ParseError { .. }
                | Self::UndefinedVariable(_)
                | Self::CircularReference(_)
                | Self::InvalidYear { .. }
        )
    }
}

/// Location information for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Location {
    /// Compute the line and column of a byte offset into `input`
    #[must_use]
    pub fn of_offset(input: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (i, ch) in input.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
