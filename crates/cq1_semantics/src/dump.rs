// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Dump implementations for the semantic tree and for values, so a host
// can render an analyzed program the same way the syntactic tree renders.

use std::fmt;

use cq1_tree::{Annotated, Dump, Dumper, Node};

use crate::semantic::{AnnotationData, Bundle, ErrorModel, Instruction, Program, Subcircuit};
use crate::values::{
    BitRefs, ConstAxis, ConstBool, ConstComplex, ConstComplexMatrix, ConstInt, ConstJson,
    ConstReal, ConstRealMatrix, ConstString, QubitRefs, Value,
};

impl Dump for Value {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        match self {
            Value::ConstBool(node) => node.dump(d),
            Value::ConstAxis(node) => node.dump(d),
            Value::ConstInt(node) => node.dump(d),
            Value::ConstReal(node) => node.dump(d),
            Value::ConstComplex(node) => node.dump(d),
            Value::ConstRealMatrix(node) => node.dump(d),
            Value::ConstComplexMatrix(node) => node.dump(d),
            Value::ConstString(node) => node.dump(d),
            Value::ConstJson(node) => node.dump(d),
            Value::QubitRefs(node) => node.dump(d),
            Value::BitRefs(node) => node.dump(d),
        }
    }
}

macro_rules! impl_dump_const {
    ($($name:ident),* $(,)?) => {
        $(
            impl Dump for $name {
                fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
                    d.begin(stringify!($name), self.is_complete(), self.source_location())?;
                    d.field_display("value", &self.value)?;
                    d.end()
                }
            }
        )*
    };
}

impl_dump_const!(
    ConstBool,
    ConstAxis,
    ConstInt,
    ConstReal,
    ConstComplex,
    ConstRealMatrix,
    ConstComplexMatrix,
    ConstString,
    ConstJson,
);

impl Dump for QubitRefs {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("QubitRefs", self.is_complete(), self.source_location())?;
        d.field_many("index", &self.index)?;
        d.end()
    }
}

impl Dump for BitRefs {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("BitRefs", self.is_complete(), self.source_location())?;
        d.field_many("index", &self.index)?;
        d.end()
    }
}

impl Dump for Program {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Program", self.is_complete(), self.source_location())?;
        d.field_display("version", &self.version)?;
        d.field_display("num_qubits", self.num_qubits)?;
        d.field_maybe("error_model", &self.error_model)?;
        d.field_any("subcircuits", &self.subcircuits)?;
        d.end()
    }
}

impl Dump for Subcircuit {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Subcircuit", self.is_complete(), self.source_location())?;
        d.field_display("name", &self.name)?;
        d.field_display("iterations", self.iterations)?;
        d.field_any("bundles", &self.bundles)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
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

impl Dump for Instruction {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("Instruction", self.is_complete(), self.source_location())?;
        d.field_display("name", &self.name)?;
        d.field_one("condition", &self.condition)?;
        d.field_any("operands", &self.operands)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for ErrorModel {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("ErrorModel", self.is_complete(), self.source_location())?;
        d.field_display("name", &self.name)?;
        d.field_any("operands", &self.operands)?;
        d.field_any("annotations", &self.annotations)?;
        d.end()
    }
}

impl Dump for AnnotationData {
    fn dump(&self, d: &mut Dumper<'_>) -> fmt::Result {
        d.begin("AnnotationData", self.is_complete(), self.source_location())?;
        d.field_display("interface", &self.interface)?;
        d.field_display("operation", &self.operation)?;
        d.field_any("operands", &self.operands)?;
        d.end()
    }
}
