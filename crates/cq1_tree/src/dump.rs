// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The human-readable tree rendering. Each node prints as
//
//   NodeName( # file:line:col
//     child: <
//       ...
//     >
//     value: 42
//   )
//
// where a missing One/Many child prints as `!MISSING`, an empty Maybe as
// `-`, an empty Any as `[]`, and an incomplete node is prefixed with `!`.

use std::fmt::{self, Write};

use crate::annotations::SourceLocation;
use crate::containers::{Any, Many, Maybe, One};

/// Nodes that render themselves through a [`Dumper`].
pub trait Dump {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result;
}

/// Indenting writer used by [`Dump`] implementations.
pub struct Dumper<'w> {
    out: &'w mut dyn Write,
    indent: usize,
}

impl<'w> Dumper<'w> {
    pub fn new(out: &'w mut dyn Write) -> Dumper<'w> {
        Dumper { out, indent: 0 }
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent {
            self.out.write_str("  ")?;
        }
        Ok(())
    }

    /// Opens a node: indentation, `!` when incomplete, the node name, and
    /// the source location when one is attached.
    pub fn begin(
        &mut self,
        name: &str,
        complete: bool,
        location: Option<&SourceLocation>,
    ) -> fmt::Result {
        self.write_indent()?;
        if !complete {
            self.out.write_char('!')?;
        }
        write!(self.out, "{name}(")?;
        if let Some(location) = location {
            write!(self.out, " # {location}")?;
        }
        self.out.write_char('\n')?;
        self.indent += 1;
        Ok(())
    }

    /// Closes the node opened by the matching [`Dumper::begin`].
    pub fn end(&mut self) -> fmt::Result {
        self.indent -= 1;
        self.write_indent()?;
        self.out.write_str(")\n")
    }

    /// A leaf field rendered inline via `Display`.
    pub fn field_display(&mut self, name: &str, value: impl fmt::Display) -> fmt::Result {
        self.write_indent()?;
        write!(self.out, "{name}: {value}\n")
    }

    pub fn field_one<T: Dump>(&mut self, name: &str, child: &One<T>) -> fmt::Result {
        match child.try_get() {
            None => {
                self.write_indent()?;
                write!(self.out, "{name}: !MISSING\n")
            }
            Some(node) => self.nested(name, node),
        }
    }

    pub fn field_maybe<T: Dump>(&mut self, name: &str, child: &Maybe<T>) -> fmt::Result {
        match child.try_get() {
            None => {
                self.write_indent()?;
                write!(self.out, "{name}: -\n")
            }
            Some(node) => self.nested(name, node),
        }
    }

    pub fn field_any<T: Dump>(&mut self, name: &str, children: &Any<T>) -> fmt::Result {
        if children.is_empty() {
            self.write_indent()?;
            return write!(self.out, "{name}: []\n");
        }
        self.sequence(name, children.iter())
    }

    pub fn field_many<T: Dump>(&mut self, name: &str, children: &Many<T>) -> fmt::Result {
        if children.is_empty() {
            self.write_indent()?;
            return write!(self.out, "{name}: !MISSING\n");
        }
        self.sequence(name, children.iter())
    }

    fn nested<T: Dump>(&mut self, name: &str, node: &T) -> fmt::Result {
        self.write_indent()?;
        write!(self.out, "{name}: <\n")?;
        self.indent += 1;
        node.dump(self)?;
        self.indent -= 1;
        self.write_indent()?;
        self.out.write_str(">\n")
    }

    fn sequence<'a, T: Dump + 'a>(
        &mut self,
        name: &str,
        children: impl Iterator<Item = &'a T>,
    ) -> fmt::Result {
        self.write_indent()?;
        write!(self.out, "{name}: [\n")?;
        self.indent += 1;
        for child in children {
            child.dump(self)?;
        }
        self.indent -= 1;
        self.write_indent()?;
        self.out.write_str("]\n")
    }
}

/// Renders a tree to a string.
pub fn dump_to_string<T: Dump>(node: &T) -> String {
    let mut out = String::new();
    node.dump(&mut Dumper::new(&mut out))
        .expect("writing to a String cannot fail");
    out
}
