// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Overload resolution, shared by the function, instruction, and error
// model tables. Names match case-insensitively. Ambiguous overloads are
// silently resolved by using the first applicable one in registration
// order, so more specific overloads must always be registered first; this
// ordering is part of the public contract.

use std::rc::Rc;

use hashbrown::HashMap;

use cq1_tree::{Annotated, Annotations};

use crate::error::{AnalysisError, ErrorKind};
use crate::semantic;
use crate::types::{self, SpecError, Type};
use crate::values::{promote, Value};

/// One overload of a callable: a tag identifying it plus the parameter
/// types it accepts.
#[derive(Clone)]
struct Overload<T> {
    tag: T,
    param_types: Vec<Type>,
}

/// The overloads registered under one name, tried in registration order.
#[derive(Clone)]
struct OverloadResolver<T> {
    overloads: Vec<Overload<T>>,
}

impl<T: Clone> OverloadResolver<T> {
    fn new() -> OverloadResolver<T> {
        OverloadResolver {
            overloads: Vec::new(),
        }
    }

    fn add_overload(&mut self, tag: T, param_types: Vec<Type>) {
        self.overloads.push(Overload { tag, param_types });
    }

    // First applicable overload wins: arity must match and every argument
    // must promote to the corresponding parameter type.
    fn resolve(&self, args: &[Value]) -> Option<(T, Vec<Value>)> {
        'overloads: for overload in &self.overloads {
            if overload.param_types.len() != args.len() {
                continue;
            }
            let mut promoted = Vec::with_capacity(args.len());
            for (arg, param_type) in args.iter().zip(&overload.param_types) {
                match promote(arg, param_type) {
                    Some(value) => promoted.push(value),
                    None => continue 'overloads,
                }
            }
            return Some((overload.tag.clone(), promoted));
        }
        None
    }
}

/// Case-insensitive table of overloaded callables.
#[derive(Clone)]
struct OverloadedNameResolver<T> {
    table: HashMap<String, OverloadResolver<T>>,
}

impl<T: Clone> OverloadedNameResolver<T> {
    fn new() -> OverloadedNameResolver<T> {
        OverloadedNameResolver {
            table: HashMap::new(),
        }
    }

    fn add_overload(&mut self, name: &str, tag: T, param_types: Vec<Type>) {
        self.table
            .entry(name.to_lowercase())
            .or_insert_with(OverloadResolver::new)
            .add_overload(tag, param_types);
    }

    fn resolve(&self, name: &str, args: &[Value]) -> Result<(T, Vec<Value>), ErrorKind> {
        match self.table.get(&name.to_lowercase()) {
            None => Err(ErrorKind::NameResolutionFailure {
                name: name.to_string(),
            }),
            Some(resolver) => resolver
                .resolve(args)
                .ok_or_else(|| ErrorKind::OverloadResolutionFailure {
                    name: name.to_string(),
                }),
        }
    }
}

/// Implementation of (one overload of) a function usable in constant
/// expressions. Receives arguments already promoted to the registered
/// parameter types, in matching order and count.
pub type FunctionImpl = Rc<dyn Fn(&[Value]) -> Result<Value, AnalysisError>>;

/// Table of all overloads of all constant-expression functions, including
/// the `operator+`-style names that unary and binary operators lower to.
#[derive(Clone)]
pub struct FunctionTable {
    resolver: OverloadedNameResolver<FunctionImpl>,
}

impl FunctionTable {
    pub fn new() -> FunctionTable {
        FunctionTable {
            resolver: OverloadedNameResolver::new(),
        }
    }

    /// Registers a function overload. Matching is case-insensitive.
    /// Register more specific overloads first: resolution picks the first
    /// applicable overload in registration order.
    pub fn add<F>(&mut self, name: &str, param_types: Vec<Type>, implementation: F)
    where
        F: Fn(&[Value]) -> Result<Value, AnalysisError> + 'static,
    {
        self.resolver
            .add_overload(name, Rc::new(implementation), param_types);
    }

    /// Resolves and calls a function.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, AnalysisError> {
        let (implementation, promoted) = self
            .resolver
            .resolve(name, args)
            .map_err(AnalysisError::from)?;
        implementation(&promoted)
    }
}

impl Default for FunctionTable {
    fn default() -> FunctionTable {
        FunctionTable::new()
    }
}

/// Representation of an instruction (aka gate) type. Hosts register these
/// to describe the instruction set they support, and may hang their own
/// bookkeeping (a gate matrix, say) off the `meta` store; resolved
/// semantic instructions carry the matching type back to the host.
#[derive(Clone, Debug, PartialEq)]
pub struct InstructionType {
    /// Name of the instruction. Matching is case-insensitive.
    pub name: String,
    /// The parameter types this overload of the instruction expects.
    pub param_types: Vec<Type>,
    /// Whether the instruction supports conditional execution by means of
    /// the c- notation.
    pub allow_conditional: bool,
    /// Whether the instruction may appear in a bundle with others.
    pub allow_parallel: bool,
    /// Whether the instruction may use the same qubit in more than one
    /// argument. Normally false; true just disables that check.
    pub allow_reused_qubits: bool,
    pub meta: Annotations,
}

impl InstructionType {
    /// Creates an instruction type from a parameter-type shorthand string
    /// (see [`types::from_spec`]).
    pub fn new(
        name: &str,
        param_types: &str,
        allow_conditional: bool,
        allow_parallel: bool,
        allow_reused_qubits: bool,
    ) -> Result<InstructionType, SpecError> {
        Ok(InstructionType {
            name: name.to_string(),
            param_types: types::from_spec(param_types)?,
            allow_conditional,
            allow_parallel,
            allow_reused_qubits,
            meta: Annotations::new(),
        })
    }
}

impl Annotated for InstructionType {
    fn meta(&self) -> &Annotations {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        &mut self.meta
    }
}

/// Table of the supported instructions and their overloads.
#[derive(Clone)]
pub struct InstructionTable {
    resolver: OverloadedNameResolver<InstructionType>,
}

impl InstructionTable {
    pub fn new() -> InstructionTable {
        InstructionTable {
            resolver: OverloadedNameResolver::new(),
        }
    }

    /// Registers an instruction type. Register more specific overloads
    /// first: resolution picks the first applicable overload in
    /// registration order.
    pub fn add(&mut self, instruction_type: InstructionType) {
        let name = instruction_type.name.clone();
        let param_types = instruction_type.param_types.clone();
        self.resolver.add_overload(&name, instruction_type, param_types);
    }

    /// Resolves an instruction to a semantic node carrying the matched
    /// type and the promoted operands. The condition defaults to constant
    /// true; the analyzer replaces it for `c-` instructions.
    pub fn resolve(
        &self,
        name: &str,
        args: &[Value],
    ) -> Result<semantic::Instruction, AnalysisError> {
        let (instruction_type, promoted) = self
            .resolver
            .resolve(name, args)
            .map_err(AnalysisError::from)?;
        Ok(semantic::Instruction::new(instruction_type, promoted))
    }
}

impl Default for InstructionTable {
    fn default() -> InstructionTable {
        InstructionTable::new()
    }
}

/// Representation of an error model type. As with instructions, hosts may
/// attach their own data through the `meta` store.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorModelType {
    /// Name of the error model. Matching is case-insensitive.
    pub name: String,
    /// The parameter types this overload of the error model expects.
    pub param_types: Vec<Type>,
    pub meta: Annotations,
}

impl ErrorModelType {
    /// Creates an error model type from a parameter-type shorthand string
    /// (see [`types::from_spec`]).
    pub fn new(name: &str, param_types: &str) -> Result<ErrorModelType, SpecError> {
        Ok(ErrorModelType {
            name: name.to_string(),
            param_types: types::from_spec(param_types)?,
            meta: Annotations::new(),
        })
    }
}

impl Annotated for ErrorModelType {
    fn meta(&self) -> &Annotations {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        &mut self.meta
    }
}

/// Table of the supported error models and their overloads.
#[derive(Clone)]
pub struct ErrorModelTable {
    resolver: OverloadedNameResolver<ErrorModelType>,
}

impl ErrorModelTable {
    pub fn new() -> ErrorModelTable {
        ErrorModelTable {
            resolver: OverloadedNameResolver::new(),
        }
    }

    /// Registers an error model type. Register more specific overloads
    /// first: resolution picks the first applicable overload in
    /// registration order.
    pub fn add(&mut self, model_type: ErrorModelType) {
        let name = model_type.name.clone();
        let param_types = model_type.param_types.clone();
        self.resolver.add_overload(&name, model_type, param_types);
    }

    /// Resolves an error model to a semantic node carrying the matched
    /// type and the promoted operands.
    pub fn resolve(
        &self,
        name: &str,
        args: &[Value],
    ) -> Result<semantic::ErrorModel, AnalysisError> {
        let (model_type, promoted) = self
            .resolver
            .resolve(name, args)
            .map_err(AnalysisError::from)?;
        Ok(semantic::ErrorModel::new(model_type, promoted))
    }
}

impl Default for ErrorModelTable {
    fn default() -> ErrorModelTable {
        ErrorModelTable::new()
    }
}
