// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::ops::Range;

use cq1_tree::SourceLocation;

/// A syntax error.
///
/// `location` is the line/column range used for the `Display` rendering;
/// `span` is the byte range within the source, kept so diagnostic renderers
/// can label the offending text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: Option<SourceLocation>,
    pub span: Option<Range<usize>>,
}

impl ParseError {
    pub fn new<T: Into<String>>(
        message: T,
        location: Option<SourceLocation>,
        span: Option<Range<usize>>,
    ) -> ParseError {
        ParseError {
            message: message.into(),
            location,
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{}: {}", location, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}
