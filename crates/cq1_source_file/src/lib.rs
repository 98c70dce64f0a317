// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Management of source units for cQASM 1.x parsing and semantic analysis.
//! The main `struct` here is [`SourceUnit`], which bundles the source text,
//! its display name, the syntactic tree produced by the parser, and any
//! parse errors.
//!
//! `report_error` formats error messages using the external crate
//! `ariadne`.

mod error_report;
mod source_file;

pub use error_report::report_error;
pub use source_file::{parse_source_file, parse_source_string, SourceUnit};
