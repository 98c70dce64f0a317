// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! Infrastructure shared by the syntactic and semantic cQASM trees.
//!
//! This crate carries no knowledge of cQASM itself. It provides
//! * the scalar and matrix primitives stored in tree leaves,
//! * the cardinality containers `Maybe`, `One`, `Any`, and `Many` that
//!   constrain how many children a node slot holds,
//! * the type-keyed [`Annotations`] store and the [`SourceLocation`]
//!   annotation kind,
//! * the [`Dump`] trait and [`Dumper`] writer producing the indented
//!   human-readable tree rendering.

mod annotations;
mod containers;
mod dump;
mod primitives;

pub use annotations::{Annotated, AnnotationValue, Annotations, SourceLocation};
pub use containers::{Any, Many, Maybe, Node, One};
pub use dump::{dump_to_string, Dump, Dumper};
pub use primitives::{Axis, CMatrix, Complex, Matrix, RMatrix, Version};
