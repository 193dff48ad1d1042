//! Defines the `CptError` type for the cptnet library

use std::io;
use std::path::PathBuf;
use std::result;

use thiserror::Error;

pub type Result<T> = result::Result<T, CptError>;

/// Largest number of parents a single variable may declare. The count table of a variable has
/// ```2^(parents + 1)``` cells, so at this limit a single table holds 2M counts (16 MiB).
pub const MAX_PARENTS: usize = 20;

#[derive(Debug, Error)]
pub enum CptError {

    /// An input or output file could not be opened, read, or written
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The CSV layer rejected a file (e.g. a row with the wrong number of columns)
    #[error("{}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    /// A line of a structure definition could not be understood
    #[error("line {line}: malformed structure definition {text:?} (expected `NAME: PARENT...`)")]
    MalformedStructure { line: usize, text: String },

    /// Represents an error where there was a parent variable expected, but not found
    #[error("variable {variable:?} names parent {parent:?}, which has not been declared")]
    MissingParent { variable: String, parent: String },

    /// A variable was declared twice
    #[error("variable {0:?} is declared more than once")]
    DuplicateVariable(String),

    /// A parent appears twice in the same parent list
    #[error("variable {variable:?} lists parent {parent:?} more than once")]
    DuplicateParent { variable: String, parent: String },

    #[error("variable {variable:?} has {count} parents (at most {max} are supported)")]
    TooManyParents { variable: String, count: usize, max: usize },

    /// No header column matches the variable
    #[error("no column in the header matches variable {0:?}")]
    UnboundVariable(String),

    /// More than one header column matches the variable
    #[error("variable {0:?} matches more than one header column")]
    DuplicateColumn(String),

    /// A token that is not a boolean where a boolean was expected
    #[error("line {line}, column {column:?}: expected `1` or `0`, found {token:?}")]
    InvalidToken { line: usize, column: String, token: String },

    /// A test row that does not have exactly one unknown value
    #[error("line {line}: expected exactly one unknown (`?`) value, found {found}")]
    UnknownCount { line: usize, found: usize },

    /// An unknown value in a file that must be fully observed
    #[error("line {line}, column {column:?}: unknown values are not allowed in training data")]
    UnexpectedUnknown { line: usize, column: String },

    /// Represents an incomplete assignment where a complete assignment was required.
    #[error("variable {0:?} has no value in the assignment")]
    MissingValue(String),

    /// The query of an inference is already fixed by the evidence
    #[error("variable {0:?} is the query but is also observed in the evidence")]
    QueryObserved(String),

    /// A probability was requested before the network was trained
    #[error("variable {0:?} has no conditional probability table; train the network first")]
    Untrained(String),
}

impl CptError {

    /// Attach a path to an `io::Error`
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CptError::Io { path: path.into(), source }
    }

    /// Attach a path to a `csv::Error`
    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        CptError::Csv { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = CptError::io("net.txt", io::Error::new(io::ErrorKind::NotFound, "not found"));
        let msg = err.to_string();
        assert!(msg.starts_with("net.txt"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn unknown_count_message() {
        let err = CptError::UnknownCount { line: 4, found: 2 };
        assert_eq!("line 4: expected exactly one unknown (`?`) value, found 2", err.to_string());
    }
}
