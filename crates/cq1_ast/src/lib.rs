// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

//! The syntactic tree for cQASM 1.x.
//!
//! The parser produces this tree; the analyzer in `cq1_semantics` consumes
//! it. Nodes own their children through the cardinality containers of
//! `cq1_tree` and carry source locations in their annotation store.
//! Structural equality ignores annotations; [`cq1_tree::Node::is_complete`]
//! recurses through children and is forced false by any `Erroneous*` node.

pub mod ast;
mod dump;
