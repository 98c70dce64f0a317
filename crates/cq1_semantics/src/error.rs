// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Analysis diagnostics. Errors raised during expression evaluation are
// caught at the enclosing statement, given that statement's source
// location when they have none of their own, and appended to the result's
// error list; analysis then continues with the next statement.

use std::fmt;

use cq1_tree::SourceLocation;
use thiserror::Error;

use crate::types::Type;

/// The error conditions recognised by the analyzer.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErrorKind {
    /// Upstream syntactic failure.
    #[error("{message}")]
    ParseError { message: String },

    #[error("use of undefined name `{name}`")]
    NameResolutionFailure { name: String },

    #[error("failed to resolve overload for `{name}` with the given argument types")]
    OverloadResolutionFailure { name: String },

    #[error("conditional execution is not supported for instruction `{name}`")]
    ConditionalExecutionNotSupported { name: String },

    #[error("instruction `{name}` is not parallelizable")]
    NotParallelizable { name: String },

    #[error("instruction `{name}` uses the same qubit more than once")]
    QubitsNotUnique { name: String },

    #[error("index {index} out of range (size {size})")]
    IndexOutOfRange { index: i64, size: usize },

    #[error("indices must be integers")]
    IndexNotInteger,

    #[error("indices must be constant")]
    IndexNotConstant,

    #[error("malformed range: first index {first} is beyond last index {last}")]
    RangeMalformed { first: i64, last: i64 },

    #[error("only constant real or complex matrices supported")]
    InvalidMatrixLiteral,

    #[error("number of qubits must be a constant integer of at least 1")]
    NumQubitsError,

    /// Fallback when no promotion rule applies.
    #[error("value of type {from} cannot be promoted to {to}")]
    UnsupportedPromotion { from: Type, to: Type },

    #[error("version components must not be negative, found {component}")]
    InvalidVersion { component: i64 },

    #[error("subcircuit iteration count must be positive, found {iterations}")]
    InvalidSubcircuitIterations { iterations: i64 },

    #[error("only qubit and bit registers can be indexed")]
    CannotIndex,

    #[error("{message}")]
    ErrorModelError { message: String },

    /// Failure raised by a host-supplied function.
    #[error("{0}")]
    Custom(String),
}

/// One analysis diagnostic: the error kind plus the closest known source
/// location.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub location: Option<SourceLocation>,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, location: Option<SourceLocation>) -> AnalysisError {
        AnalysisError { kind, location }
    }

    /// Attaches `location` when the error does not already carry one.
    pub fn at(mut self, location: Option<&SourceLocation>) -> AnalysisError {
        if self.location.is_none() {
            self.location = location.cloned();
        }
        self
    }
}

impl From<ErrorKind> for AnalysisError {
    fn from(kind: ErrorKind) -> AnalysisError {
        AnalysisError::new(kind, None)
    }
}

impl fmt::Display for AnalysisError {
    /// Renders as `filename:line[:col][..line[:col]]: message` when a
    /// location is known.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_location() {
        let error = AnalysisError::new(
            ErrorKind::IndexOutOfRange { index: 5, size: 2 },
            Some(SourceLocation::new("test.cq", 3, 3, 3, 7)),
        );
        assert_eq!(
            error.to_string(),
            "test.cq:3:3..3:7: index 5 out of range (size 2)"
        );
    }

    #[test]
    fn test_at_does_not_overwrite() {
        let location = SourceLocation::new("a.cq", 1, 1, 1, 2);
        let other = SourceLocation::new("b.cq", 9, 9, 9, 9);
        let error = AnalysisError::new(ErrorKind::IndexNotInteger, Some(location.clone()))
            .at(Some(&other));
        assert_eq!(error.location, Some(location));
    }
}
