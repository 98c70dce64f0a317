// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::{Path, PathBuf};

use cq1_ast::ast;
use cq1_parser::{parse_source, ParseError, ParseOutput};
use cq1_tree::{One, SourceLocation};

use crate::error_report::report_error;

/// A parsed source text: display name, the text itself, the syntactic
/// tree, and the parse errors.
pub struct SourceUnit {
    file_path: Option<PathBuf>,
    file_name: String,
    source: String,
    root: One<ast::Root>,
    errors: Vec<ParseError>,
}

/// Parses source text held in a string. `file_name` is only used for
/// diagnostics; it defaults to `<unknown>`.
pub fn parse_source_string<T: AsRef<str>>(source: T, file_name: Option<&str>) -> SourceUnit {
    let source = source.as_ref().to_string();
    let ParseOutput { root, errors } = parse_source(&source, file_name);
    SourceUnit {
        file_path: None,
        file_name: file_name.unwrap_or("<unknown>").to_string(),
        source,
        root,
        errors,
    }
}

/// Reads and parses a source file. The file handle is released before this
/// function returns, whether parsing succeeds or not.
pub fn parse_source_file<P: AsRef<Path>>(file_path: P) -> io::Result<SourceUnit> {
    let file_path = file_path.as_ref();
    let source = std::fs::read_to_string(file_path)?;
    let file_name = file_path.display().to_string();
    let ParseOutput { root, errors } = parse_source(&source, Some(&file_name));
    Ok(SourceUnit {
        file_path: Some(file_path.to_path_buf()),
        file_name,
        source,
        root,
        errors,
    })
}

impl SourceUnit {
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parse root; empty only if the parser panicked before producing
    /// even an erroneous root, which does not happen in practice.
    pub fn ast(&self) -> &One<ast::Root> {
        &self.root
    }

    pub fn root(&self) -> Option<&ast::Root> {
        self.root.try_get()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Byte offset of a 1-based line/column position within the source.
    pub fn offset_of(&self, line: u32, column: u32) -> Option<usize> {
        if line == 0 {
            return None;
        }
        let line_start = self
            .source
            .split_inclusive('\n')
            .scan(0usize, |offset, text| {
                let start = *offset;
                *offset += text.len();
                Some(start)
            })
            .nth(line as usize - 1)?;
        Some(line_start + column.saturating_sub(1) as usize)
    }

    /// Byte span of a line/column location, for diagnostic labels.
    pub fn span_of(&self, location: &SourceLocation) -> Option<std::ops::Range<usize>> {
        let start = self.offset_of(location.first_line, location.first_column)?;
        let end = self
            .offset_of(location.last_line, location.last_column)
            .unwrap_or(start);
        Some(start..end.max(start))
    }

    /// Prints all parse errors as compiler-style reports.
    pub fn print_errors(&self) {
        for error in &self.errors {
            self.print_diagnostic(&error.message, error.span.clone());
        }
    }

    /// Prints one message against this unit's source text. Falls back to a
    /// plain line when no span is available.
    pub fn print_diagnostic(&self, message: &str, span: Option<std::ops::Range<usize>>) {
        match span {
            Some(span) => report_error(message, &span, &self.file_name, &self.source),
            None => println!("{}: {}", self.file_name, message),
        }
    }
}
