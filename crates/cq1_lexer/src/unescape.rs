// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Escape resolution for string literal contents.
//!
//! The language supports exactly `\n \t \r \' \" \\`.

use std::fmt;

/// An invalid or incomplete escape sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapeError {
    /// Byte offset of the offending backslash within the literal contents.
    pub pos: usize,
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid escape sequence at offset {}", self.pos)
    }
}

/// Resolves escape sequences in the contents of a string literal, excluding
/// the surrounding quotes.
pub fn unescape_str(raw: &str) -> Result<String, EscapeError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let resolved = match chars.next() {
            Some((_, 'n')) => '\n',
            Some((_, 't')) => '\t',
            Some((_, 'r')) => '\r',
            Some((_, '\'')) => '\'',
            Some((_, '"')) => '"',
            Some((_, '\\')) => '\\',
            _ => return Err(EscapeError { pos }),
        };
        out.push(resolved);
    }
    Ok(out)
}
