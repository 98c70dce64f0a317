// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Dump implementations for the syntactic tree. These follow the uniform
// shape produced for every node kind: the node name, then one labelled
// child per line.

use std::fmt;

use cq1_tree::{Annotated, Dump, Dumper, Node};

use crate::ast::*;

impl Dump for Expression {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        match self {
            Expression::IntegerLiteral(node) => node.dump(d),
            Expression::FloatLiteral(node) => node.dump(d),
            Expression::Identifier(node) => node.dump(d),
            Expression::MatrixLiteral1(node) => node.dump(d),
            Expression::MatrixLiteral2(node) => node.dump(d),
            Expression::StringLiteral(node) => node.dump(d),
            Expression::JsonLiteral(node) => node.dump(d),
            Expression::FunctionCall(node) => node.dump(d),
            Expression::Index(node) => node.dump(d),
            Expression::Negate(node) => node.dump(d),
            Expression::Power(node) => node.dump(d),
            Expression::Multiply(node) => node.dump(d),
            Expression::Divide(node) => node.dump(d),
            Expression::Add(node) => node.dump(d),
            Expression::Subtract(node) => node.dump(d),
            Expression::Erroneous(node) => node.dump(d),
        }
    }
}

impl Dump for IntegerLiteral {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("IntegerLiteral", self.is_complete(), self.source_location())?;
        d.field_display("value", self.value)?;
        d.end()
    }
}

impl Dump for FloatLiteral {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("FloatLiteral", self.is_complete(), self.source_location())?;
        d.field_display("value", self.value)?;
        d.end()
    }
}

impl Dump for Identifier {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Identifier", self.is_complete(), self.source_location())?;
        d.field_display("name", &self.name)?;
        d.end()
    }
}

impl Dump for StringLiteral {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("StringLiteral", self.is_complete(), self.source_location())?;
        d.field_display("value", &self.value)?;
        d.end()
    }
}

impl Dump for JsonLiteral {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("JsonLiteral", self.is_complete(), self.source_location())?;
        d.field_display("value", &self.value)?;
        d.end()
    }
}

impl Dump for MatrixLiteral1 {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("MatrixLiteral1", self.is_complete(), self.source_location())?;
        d.field_one("pairs", &self.pairs)?;
        d.end()
    }
}

impl Dump for MatrixLiteral2 {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("MatrixLiteral2", self.is_complete(), self.source_location())?;
        d.field_many("rows", &self.rows)?;
        d.end()
    }
}

impl Dump for FunctionCall {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("FunctionCall", self.is_complete(), self.source_location())?;
        d.field_one("name", &self.name)?;
        d.field_one("arguments", &self.arguments)?;
        d.end()
    }
}

impl Dump for Index {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Index", self.is_complete(), self.source_location())?;
        d.field_one("expr", &self.expr)?;
        d.field_one("indices", &self.indices)?;
        d.end()
    }
}

impl Dump for Negate {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Negate", self.is_complete(), self.source_location())?;
        d.field_one("expr", &self.expr)?;
        d.end()
    }
}

macro_rules! impl_dump_binary_op {
    ($($name:ident),* $(,)?) => {
        $(
            impl Dump for $name {
                fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
                    d.begin(stringify!($name), self.is_complete(), self.source_location())?;
                    d.field_one("lhs", &self.lhs)?;
                    d.field_one("rhs", &self.rhs)?;
                    d.end()
                }
            }
        )*
    };
}

impl_dump_binary_op!(Power, Multiply, Divide, Add, Subtract);

impl Dump for ErroneousExpression {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin(
            "ErroneousExpression",
            self.is_complete(),
            self.source_location(),
        )?;
        d.end()
    }
}

impl Dump for ExpressionList {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("ExpressionList", self.is_complete(), self.source_location())?;
        d.field_any("items", &self.items)?;
        d.end()
    }
}

impl Dump for IndexEntry {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        match self {
            IndexEntry::Item(node) => node.dump(d),
            IndexEntry::Range(node) => node.dump(d),
        }
    }
}

impl Dump for IndexItem {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("IndexItem", self.is_complete(), self.source_location())?;
        d.field_one("index", &self.index)?;
        d.end()
    }
}

impl Dump for IndexRange {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("IndexRange", self.is_complete(), self.source_location())?;
        d.field_one("first", &self.first)?;
        d.field_one("last", &self.last)?;
        d.end()
    }
}

impl Dump for IndexList {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("IndexList", self.is_complete(), self.source_location())?;
        d.field_many("items", &self.items)?;
        d.end()
    }
}

impl Dump for AnnotationData {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("AnnotationData", self.is_complete(), self.source_location())?;
        d.field_one("interface", &self.interface)?;
        d.field_one("operation", &self.operation)?;
        d.field_maybe("operands", &self.operands)?;
        d.end()
    }
}

impl Dump for Instruction {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Instruction", self.is_complete(), self.source_location())?;
        d.field_one("name", &self.name)?;
        d.field_maybe("condition", &self.condition)?;
        d.field_one("operands", &self.operands)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for Statement {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        match self {
            Statement::Bundle(node) => node.dump(d),
            Statement::Mapping(node) => node.dump(d),
            Statement::Subcircuit(node) => node.dump(d),
            Statement::Erroneous(node) => node.dump(d),
        }
    }
}

impl Dump for Bundle {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Bundle", self.is_complete(), self.source_location())?;
        d.field_many("items", &self.items)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for Mapping {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Mapping", self.is_complete(), self.source_location())?;
        d.field_one("alias", &self.alias)?;
        d.field_one("expr", &self.expr)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for Subcircuit {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Subcircuit", self.is_complete(), self.source_location())?;
        d.field_one("name", &self.name)?;
        d.field_maybe("iterations", &self.iterations)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for ErroneousStatement {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin(
            "ErroneousStatement",
            self.is_complete(),
            self.source_location(),
        )?;
        d.end()
    }
}

impl Dump for StatementList {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("StatementList", self.is_complete(), self.source_location())?;
        d.field_any("items", &self.items)?;
        d.end()
    }
}

impl Dump for Version {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Version", self.is_complete(), self.source_location())?;
        let items = self
            .items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(".");
        d.field_display("items", items)?;
        d.end()
    }
}

impl Dump for Root {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        match self {
            Root::Program(node) => node.dump(d),
            Root::Erroneous(node) => node.dump(d),
        }
    }
}

impl Dump for Program {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Program", self.is_complete(), self.source_location())?;
        d.field_one("version", &self.version)?;
        d.field_one("num_qubits", &self.num_qubits)?;
        d.field_one("statements", &self.statements)?;
        d.end()
    }
}

impl Dump for ErroneousProgram {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin(
            "ErroneousProgram",
            self.is_complete(),
            self.source_location(),
        )?;
        d.end()
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use cq1_tree::dump_to_string;

    #[test]
    fn test_dump_shapes() {
        let instruction = Instruction::new(
            Identifier::new("h"),
            None,
            ExpressionList::from_vec(vec![Identifier::new("q").to_expression()]),
        );
        let text = dump_to_string(&instruction);
        assert_eq!(
            text,
            "\
Instruction(
  name: <
    Identifier(
      name: h
    )
  >
  condition: -
  operands: <
    ExpressionList(
      items: [
        Identifier(
          name: q
        )
      ]
    )
  >
  annotations: []
)
"
        );
    }

    #[test]
    fn test_dump_marks_missing_and_incomplete() {
        let mut instruction = Instruction::new(Identifier::new("h"), None, ExpressionList::new());
        instruction.name.reset();
        let text = dump_to_string(&instruction);
        assert!(text.starts_with("!Instruction("));
        assert!(text.contains("name: !MISSING"));
    }

    #[test]
    fn test_dump_empty_many_is_missing() {
        let list = IndexList::new();
        let text = dump_to_string(&list);
        assert_eq!(text, "!IndexList(\n  items: !MISSING\n)\n");
    }
}
