// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The semantic tree: what the analyzer hands to the host. Unlike the
// syntactic tree, names are plain strings, expressions have been folded
// into values, and every instruction links back to the registered
// instruction type it resolved to.

use cq1_tree::{Annotated, Annotations, Any, Many, Maybe, Node, One, Version};

use crate::resolver::{ErrorModelType, InstructionType};
use crate::values::{ConstBool, Value};

macro_rules! impl_annotated {
    ($($name:ident),* $(,)?) => {
        $(
            impl Annotated for $name {
                fn meta(&self) -> &Annotations {
                    &self.meta
                }

                fn meta_mut(&mut self) -> &mut Annotations {
                    &mut self.meta
                }
            }
        )*
    };
}

/// An analyzed program.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    /// File version, major first.
    pub version: Version,
    /// Number of qubits (and measurement bits) in the qubit register.
    pub num_qubits: i64,
    /// The error model, when the program specified one.
    pub error_model: Maybe<ErrorModel>,
    pub subcircuits: Any<Subcircuit>,
    pub meta: Annotations,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }
}

impl Node for Program {
    fn is_complete(&self) -> bool {
        self.version.is_complete()
            && self.error_model.is_complete()
            && self.subcircuits.is_complete()
    }
}

/// A named, optionally repeated sequence of bundles.
#[derive(Clone, Debug, PartialEq)]
pub struct Subcircuit {
    pub name: String,
    /// Number of times to run the bundles, at least 1.
    pub iterations: i64,
    pub bundles: Any<Bundle>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Subcircuit {
    pub fn new<T: Into<String>>(name: T, iterations: i64) -> Subcircuit {
        Subcircuit {
            name: name.into(),
            iterations,
            bundles: Any::new(),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for Subcircuit {
    fn is_complete(&self) -> bool {
        self.bundles.is_complete() && self.annotations.is_complete()
    }
}

/// A set of instructions executing in parallel in one cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Bundle {
    pub items: Many<Instruction>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Bundle {
    pub fn new(items: Vec<Instruction>) -> Bundle {
        Bundle {
            items: Many::from_vec(items),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for Bundle {
    fn is_complete(&self) -> bool {
        self.items.is_complete() && self.annotations.is_complete()
    }
}

/// A resolved instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    /// The registered type this instruction resolved to, including any
    /// host bookkeeping attached to it.
    pub instruction_type: InstructionType,
    /// The (registered) name of the instruction.
    pub name: String,
    /// Condition for executing the instruction; constant true when the
    /// program did not use the c- notation.
    pub condition: One<Value>,
    /// Operands, promoted to the matched overload's parameter types.
    pub operands: Any<Value>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Instruction {
    pub fn new(instruction_type: InstructionType, operands: Vec<Value>) -> Instruction {
        Instruction {
            name: instruction_type.name.clone(),
            instruction_type,
            condition: One::new(ConstBool::new(true).to_value()),
            operands: Any::from_vec(operands),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for Instruction {
    fn is_complete(&self) -> bool {
        self.condition.is_complete() && self.operands.is_complete() && self.annotations.is_complete()
    }
}

/// A resolved error model.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorModel {
    /// The registered type this error model resolved to.
    pub model_type: ErrorModelType,
    /// The (registered) name of the error model.
    pub name: String,
    /// Operands, promoted to the matched overload's parameter types.
    pub operands: Any<Value>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl ErrorModel {
    pub fn new(model_type: ErrorModelType, operands: Vec<Value>) -> ErrorModel {
        ErrorModel {
            name: model_type.name.clone(),
            model_type,
            operands: Any::from_vec(operands),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for ErrorModel {
    fn is_complete(&self) -> bool {
        self.operands.is_complete() && self.annotations.is_complete()
    }
}

/// An `@interface.operation(...)` annotation, lowered: names extracted,
/// operand expressions evaluated. Hosts interpret these themselves.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationData {
    pub interface: String,
    pub operation: String,
    pub operands: Any<Value>,
    pub meta: Annotations,
}

impl AnnotationData {
    pub fn new<T: Into<String>, U: Into<String>>(interface: T, operation: U) -> AnnotationData {
        AnnotationData {
            interface: interface.into(),
            operation: operation.into(),
            operands: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for AnnotationData {
    fn is_complete(&self) -> bool {
        self.operands.is_complete()
    }
}

impl_annotated!(
    Program,
    Subcircuit,
    Bundle,
    Instruction,
    ErrorModel,
    AnnotationData,
);
