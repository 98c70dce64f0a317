// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

use ariadne::{ColorGenerator, Config, Label, Report, ReportKind, Source};
use std::ops::Range;

/// Prints a compiler-style error report for a span of the source text.
/// `span` is a byte range from the beginning of the file.
pub fn report_error(message: &str, span: &Range<usize>, file_path: &str, source: &str) {
    let mut colors = ColorGenerator::new();
    let color = colors.next();
    let offset = span.start;
    Report::build(ReportKind::Error, file_path, offset)
        .with_message(message)
        .with_config(Config::default().with_compact(true))
        .with_label(
            Label::new((file_path, span.clone()))
                .with_message("Near this point")
                .with_color(color),
        )
        .finish()
        .print((file_path, Source::from(source)))
        .unwrap();
}
