// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Semantic analysis for cQASM 1.x.
//!
//! A host registers the instructions (gates), error models, and constant
//! functions it supports with an [`Analyzer`], then feeds it source text:
//!
//! ```
//! use cq1_semantics::Analyzer;
//!
//! let mut analyzer = Analyzer::with_defaults();
//! analyzer.register_instruction("h", "q", true, true, false).unwrap();
//! let result = analyzer.analyze("version 1.0\nqubits 2\nh q[0]", None);
//! assert!(result.is_ok());
//! ```
//!
//! The result is a semantic tree (`semantic::Program`) plus a list of
//! diagnostics; errors are reported through the list, never thrown across
//! the public surface.

pub mod analyzer;
pub mod error;
pub mod functions;
pub mod mapping;
pub mod resolver;
pub mod semantic;
pub mod types;
pub mod values;

mod dump;

pub use analyzer::{AnalysisResult, Analyzer};
