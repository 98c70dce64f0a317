// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The analyzer pipeline: syntactic tree in, semantic tree plus error list
// out. Statements are visited in source order, children left to right.
// Errors raised inside a statement abort that statement only; analysis
// continues with the next one, so the host always gets a best-effort
// program together with every diagnostic found.

use std::io;
use std::mem::replace;
use std::path::Path;

use either::Either;
use hashbrown::HashSet;

use cq1_ast::ast;
use cq1_source_file::{parse_source_file, parse_source_string, SourceUnit};
use cq1_tree::{Annotated, Any, Axis, Many, Maybe, One, Version};

use crate::error::{AnalysisError, ErrorKind};
use crate::functions::register_default_functions;
use crate::mapping::MappingTable;
use crate::resolver::{
    ErrorModelTable, ErrorModelType, FunctionTable, InstructionTable, InstructionType,
};
use crate::semantic;
use crate::types::{IsAssignable, SpecError, Type};
use crate::values::{
    promote, BitRefs, ConstAxis, ConstBool, ConstComplexMatrix, ConstInt, ConstJson, ConstReal,
    ConstRealMatrix, ConstString, QubitRefs, Value,
};

/// The analysis entry point. Register the supported instruction set, error
/// models, and constant functions, then call [`Analyzer::analyze`].
///
/// The analyzer is not re-entrant while being mutated; concurrent analyses
/// must not share one instance.
pub struct Analyzer {
    functions: FunctionTable,
    instructions: InstructionTable,
    error_models: ErrorModelTable,
    mappings: MappingTable,
}

/// What an analysis returns: the semantic program (possibly partial, empty
/// only when the parse failed outright) and the accumulated diagnostics.
/// The analysis succeeded if and only if `errors` is empty.
pub struct AnalysisResult {
    pub program: Maybe<semantic::Program>,
    pub errors: Vec<AnalysisError>,
}

impl AnalysisResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn program(&self) -> Option<&semantic::Program> {
        self.program.try_get()
    }
}

impl Analyzer {
    /// Creates an analyzer with empty tables. Most hosts want
    /// [`Analyzer::with_defaults`] instead.
    pub fn new() -> Analyzer {
        Analyzer {
            functions: FunctionTable::new(),
            instructions: InstructionTable::new(),
            error_models: ErrorModelTable::new(),
            mappings: MappingTable::new(),
        }
    }

    /// Creates an analyzer preloaded with the default operator functions
    /// and the builtin `x`, `y`, `z`, `true`, and `false` mappings.
    pub fn with_defaults() -> Analyzer {
        let mut analyzer = Analyzer::new();
        register_default_functions(&mut analyzer.functions);
        analyzer.register_default_mappings();
        analyzer
    }

    /// Installs the builtin mappings: the three axes and the two boolean
    /// constants.
    pub fn register_default_mappings(&mut self) {
        self.mappings.add("x", ConstAxis::new(Axis::X).to_value());
        self.mappings.add("y", ConstAxis::new(Axis::Y).to_value());
        self.mappings.add("z", ConstAxis::new(Axis::Z).to_value());
        self.mappings.add("true", ConstBool::new(true).to_value());
        self.mappings.add("false", ConstBool::new(false).to_value());
    }

    /// Binds `name` to a fixed value in the initial mapping scope of every
    /// analysis.
    pub fn register_mapping(&mut self, name: &str, value: Value) {
        self.mappings.add(name, value);
    }

    /// Registers an instruction. `param_types` is the one-character-per-
    /// parameter shorthand of [`crate::types::from_spec`]. Overloads
    /// resolve to the first applicable one in registration order, so
    /// register more specific overloads first.
    pub fn register_instruction(
        &mut self,
        name: &str,
        param_types: &str,
        allow_conditional: bool,
        allow_parallel: bool,
        allow_reused_qubits: bool,
    ) -> Result<(), SpecError> {
        self.instructions.add(InstructionType::new(
            name,
            param_types,
            allow_conditional,
            allow_parallel,
            allow_reused_qubits,
        )?);
        Ok(())
    }

    /// Registers a fully constructed instruction type, e.g. one carrying
    /// host annotations.
    pub fn register_instruction_type(&mut self, instruction_type: InstructionType) {
        self.instructions.add(instruction_type);
    }

    /// Registers an error model from a parameter-type shorthand.
    pub fn register_error_model(&mut self, name: &str, param_types: &str) -> Result<(), SpecError> {
        self.error_models.add(ErrorModelType::new(name, param_types)?);
        Ok(())
    }

    /// Registers a fully constructed error model type.
    pub fn register_error_model_type(&mut self, model_type: ErrorModelType) {
        self.error_models.add(model_type);
    }

    /// Registers a constant function. Overload ordering matters; see
    /// [`Analyzer::register_instruction`].
    pub fn register_function<F>(&mut self, name: &str, param_types: Vec<Type>, implementation: F)
    where
        F: Fn(&[Value]) -> Result<Value, AnalysisError> + 'static,
    {
        self.functions.add(name, param_types, implementation);
    }

    /// Parses and analyzes source text. `file_name` only affects
    /// diagnostics.
    pub fn analyze(&self, source: &str, file_name: Option<&str>) -> AnalysisResult {
        let source_unit = parse_source_string(source, file_name);
        self.analyze_source(&source_unit)
    }

    /// Parses and analyzes a source file.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> io::Result<AnalysisResult> {
        let source_unit = parse_source_file(path)?;
        Ok(self.analyze_source(&source_unit))
    }

    /// Analyzes an already-parsed source unit. Semantic analysis only runs
    /// when the parse itself was clean; use [`Analyzer::analyze_ast`] for
    /// best-effort analysis of a tree with parse errors.
    pub fn analyze_source(&self, source_unit: &SourceUnit) -> AnalysisResult {
        if source_unit.has_errors() {
            let errors = source_unit
                .errors()
                .iter()
                .map(|error| {
                    AnalysisError::new(
                        ErrorKind::ParseError {
                            message: error.message.clone(),
                        },
                        error.location.clone(),
                    )
                })
                .collect();
            return AnalysisResult {
                program: Maybe::empty(),
                errors,
            };
        }
        match source_unit.root() {
            Some(ast::Root::Program(program)) => self.analyze_ast(program),
            _ => AnalysisResult {
                program: Maybe::empty(),
                errors: vec![AnalysisError::new(
                    ErrorKind::ParseError {
                        message: "no program to analyze".to_string(),
                    },
                    None,
                )],
            },
        }
    }

    /// Builds the semantic program for a syntactic one. Always produces a
    /// (possibly partial) program; diagnostics accumulate in the result.
    pub fn analyze_ast(&self, program: &ast::Program) -> AnalysisResult {
        let mut context = AnalyzerContext {
            analyzer: self,
            mappings: self.mappings.clone(),
            program: semantic::Program::new(),
            errors: Vec::new(),
        };
        context.analyze_program(program);
        AnalysisResult {
            program: Maybe::new(context.program),
            errors: context.errors,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Analyzer {
        Analyzer::new()
    }
}

// Working state of one analysis run.
struct AnalyzerContext<'a> {
    analyzer: &'a Analyzer,
    mappings: MappingTable,
    program: semantic::Program,
    errors: Vec<AnalysisError>,
}

// Fetches a mandatory child, degrading to an analysis error on trees that
// the parser left incomplete.
fn required<'t, T>(slot: &'t One<T>, what: &str) -> Result<&'t T, AnalysisError> {
    slot.try_get().ok_or_else(|| {
        AnalysisError::new(
            ErrorKind::ParseError {
                message: format!("missing {what}"),
            },
            None,
        )
    })
}

impl AnalyzerContext<'_> {
    fn record(&mut self, error: AnalysisError) {
        self.errors.push(error);
    }

    fn analyze_program(&mut self, program: &ast::Program) {
        self.program.copy_location_from(program);

        // Version: copy the components, flagging negative ones. A negative
        // component does not abort the analysis.
        match program.version.try_get() {
            Some(version) => {
                for &component in &version.items {
                    if component < 0 {
                        self.record(AnalysisError::new(
                            ErrorKind::InvalidVersion { component },
                            version.source_location().cloned(),
                        ));
                    }
                }
                self.program.version = Version::new(version.items.clone());
            }
            None => self.record(AnalysisError::new(
                ErrorKind::ParseError {
                    message: "program has no version".to_string(),
                },
                program.source_location().cloned(),
            )),
        }

        // Qubit count, then the default q and b register mappings, each
        // index tagged with the location of the qubit count expression.
        let num_qubits = self.analyze_num_qubits(program);
        self.program.num_qubits = num_qubits;
        let location = program
            .num_qubits
            .try_get()
            .and_then(|expr| expr.source_location().cloned());
        let indices: Many<ConstInt> = (0..num_qubits)
            .map(|index| {
                let mut index = ConstInt::new(index);
                if let Some(location) = &location {
                    index.set_source_location(location.clone());
                }
                index
            })
            .collect();
        self.mappings
            .add("q", QubitRefs::new(indices.clone()).to_value());
        self.mappings.add("b", BitRefs::new(indices).to_value());

        // Statements, in source order. Errors stick to their statement.
        if let Some(statements) = program.statements.try_get() {
            for statement in &statements.items {
                if let Err(error) = self.analyze_statement(statement) {
                    let error = error.at(statement.source_location());
                    self.record(error);
                }
            }
        }
    }

    fn analyze_num_qubits(&mut self, program: &ast::Program) -> i64 {
        let expr = match program.num_qubits.try_get() {
            Some(expr) => expr,
            None => {
                self.record(AnalysisError::new(
                    ErrorKind::NumQubitsError,
                    program.source_location().cloned(),
                ));
                return 0;
            }
        };
        // The qubit count is evaluated under an empty mapping scope.
        let saved = replace(&mut self.mappings, MappingTable::new());
        let value = self.analyze_expression(expr);
        self.mappings = saved;
        match value {
            Ok(value) => {
                if let Some(Value::ConstInt(count)) =
                    promote(&value, &Type::Int(IsAssignable::False))
                {
                    if count.value >= 1 {
                        return count.value;
                    }
                }
                self.record(AnalysisError::new(
                    ErrorKind::NumQubitsError,
                    expr.source_location().cloned(),
                ));
            }
            Err(error) => self.record(error.at(expr.source_location())),
        }
        0
    }

    //
    // Statements
    //

    fn analyze_statement(&mut self, statement: &ast::Statement) -> Result<(), AnalysisError> {
        match statement {
            ast::Statement::Mapping(mapping) => {
                let alias = required(&mapping.alias, "mapping alias")?;
                let expr = required(&mapping.expr, "mapping expression")?;
                let value = self.analyze_expression(expr)?;
                let name = alias.name.clone();
                self.mappings.add(&name, value);
                Ok(())
            }
            ast::Statement::Subcircuit(subcircuit) => self.analyze_subcircuit(subcircuit),
            ast::Statement::Bundle(bundle) => self.analyze_bundle(bundle),
            // The parser already reported these.
            ast::Statement::Erroneous(_) => Ok(()),
        }
    }

    fn analyze_subcircuit(&mut self, subcircuit: &ast::Subcircuit) -> Result<(), AnalysisError> {
        let name = required(&subcircuit.name, "subcircuit name")?;
        let mut iterations = 1i64;
        if let Some(expr) = subcircuit.iterations.try_get() {
            let value = self.analyze_expression(expr)?;
            match promote(&value, &Type::Int(IsAssignable::False)) {
                Some(Value::ConstInt(count)) => {
                    if count.value < 1 {
                        // Keep the subcircuit with one iteration so later
                        // bundles still have a home.
                        self.record(AnalysisError::new(
                            ErrorKind::InvalidSubcircuitIterations {
                                iterations: count.value,
                            },
                            expr.source_location().cloned(),
                        ));
                    } else {
                        iterations = count.value;
                    }
                }
                _ => {
                    return Err(AnalysisError::new(
                        ErrorKind::UnsupportedPromotion {
                            from: value.value_type(),
                            to: Type::Int(IsAssignable::False),
                        },
                        expr.source_location().cloned(),
                    ));
                }
            }
        }
        let mut semantic_subcircuit = semantic::Subcircuit::new(&name.name, iterations);
        semantic_subcircuit.annotations = self.analyze_annotations(&subcircuit.annotations)?;
        semantic_subcircuit.copy_location_from(subcircuit);
        self.program.subcircuits.add(semantic_subcircuit);
        Ok(())
    }

    fn analyze_bundle(&mut self, bundle: &ast::Bundle) -> Result<(), AnalysisError> {
        // The error model declaration is syntactically an instruction;
        // intercept it by name before instruction resolution.
        let is_error_model = bundle.items.get(0).is_some_and(|instruction| {
            instruction
                .name
                .try_get()
                .is_some_and(|name| name.name.eq_ignore_ascii_case("error_model"))
        });
        if is_error_model {
            return self.analyze_error_model(bundle);
        }

        let mut items: Vec<semantic::Instruction> = Vec::new();
        for instruction in &bundle.items {
            if let Some(instruction) = self.analyze_instruction(instruction, items.len())? {
                items.push(instruction);
            }
        }
        if items.is_empty() {
            // Everything was statically eliminated; no bundle results.
            return Ok(());
        }
        let mut semantic_bundle = semantic::Bundle::new(items);
        semantic_bundle.annotations = self.analyze_annotations(&bundle.annotations)?;
        semantic_bundle.copy_location_from(bundle);
        self.current_subcircuit().bundles.add(semantic_bundle);
        Ok(())
    }

    // Bundles must live inside a subcircuit; open the anonymous default
    // one when the program never declared a label.
    fn current_subcircuit(&mut self) -> &mut semantic::Subcircuit {
        if self.program.subcircuits.is_empty() {
            self.program
                .subcircuits
                .add(semantic::Subcircuit::new("default", 1));
        }
        self.program.subcircuits.last_mut().unwrap()
    }

    fn analyze_instruction(
        &mut self,
        instruction: &ast::Instruction,
        bundled_so_far: usize,
    ) -> Result<Option<semantic::Instruction>, AnalysisError> {
        let name = required(&instruction.name, "instruction name")?;
        let operand_exprs = required(&instruction.operands, "instruction operands")?;

        let mut operands = Vec::with_capacity(operand_exprs.items.len());
        for expr in &operand_exprs.items {
            operands.push(self.analyze_expression(expr)?);
        }

        let mut resolved = self
            .analyzer
            .instructions
            .resolve(&name.name, &operands)
            .map_err(|error| error.at(name.source_location()))?;

        // Qubit uniqueness across all operands.
        if !resolved.instruction_type.allow_reused_qubits {
            let mut seen = HashSet::new();
            for operand in &resolved.operands {
                if let Value::QubitRefs(refs) = operand {
                    for index in &refs.index {
                        if !seen.insert(index.value) {
                            return Err(AnalysisError::new(
                                ErrorKind::QubitsNotUnique {
                                    name: resolved.name.clone(),
                                },
                                instruction.source_location().cloned(),
                            ));
                        }
                    }
                }
            }
        }

        // Condition. A condition that folds to constant false eliminates
        // the instruction entirely.
        if let Some(condition_expr) = instruction.condition.try_get() {
            if !resolved.instruction_type.allow_conditional {
                return Err(AnalysisError::new(
                    ErrorKind::ConditionalExecutionNotSupported {
                        name: resolved.name.clone(),
                    },
                    condition_expr.source_location().cloned(),
                ));
            }
            let condition_value = self.analyze_expression(condition_expr)?;
            let promoted = promote(&condition_value, &Type::Bool(IsAssignable::False));
            let promoted = match promoted {
                Some(promoted) => promoted,
                None => {
                    return Err(AnalysisError::new(
                        ErrorKind::UnsupportedPromotion {
                            from: condition_value.value_type(),
                            to: Type::Bool(IsAssignable::False),
                        },
                        condition_expr.source_location().cloned(),
                    ));
                }
            };
            if matches!(&promoted, Value::ConstBool(flag) if !flag.value) {
                return Ok(None);
            }
            resolved.condition = One::new(promoted);
        }

        // Parallelizability against the instructions already accepted into
        // the surrounding bundle.
        if bundled_so_far > 0 && !resolved.instruction_type.allow_parallel {
            return Err(AnalysisError::new(
                ErrorKind::NotParallelizable {
                    name: resolved.name.clone(),
                },
                instruction.source_location().cloned(),
            ));
        }

        resolved.annotations = self.analyze_annotations(&instruction.annotations)?;
        resolved.copy_location_from(instruction);
        Ok(Some(resolved))
    }

    fn analyze_error_model(&mut self, bundle: &ast::Bundle) -> Result<(), AnalysisError> {
        let error = |message: &str, location: Option<&cq1_tree::SourceLocation>| {
            Err(AnalysisError::new(
                ErrorKind::ErrorModelError {
                    message: message.to_string(),
                },
                location.cloned(),
            ))
        };

        if bundle.items.len() > 1 {
            return error(
                "error_model cannot be bundled with other instructions",
                bundle.source_location(),
            );
        }
        let instruction = &bundle.items[0];
        if !instruction.condition.is_empty() {
            return error(
                "error_model cannot be executed conditionally",
                instruction.source_location(),
            );
        }
        if !self.program.error_model.is_empty() {
            return error(
                "error model is set more than once",
                instruction.source_location(),
            );
        }

        let operand_exprs = required(&instruction.operands, "error model operands")?;
        let mut exprs = operand_exprs.items.iter();
        let name_expr = match exprs.next() {
            Some(expr) => expr,
            None => {
                return error(
                    "error_model requires a name operand",
                    instruction.source_location(),
                );
            }
        };
        let model_name = match name_expr.as_identifier() {
            Some(identifier) => identifier,
            None => {
                return error(
                    "the first operand of error_model must be an identifier",
                    name_expr.source_location(),
                );
            }
        };

        let mut operands = Vec::new();
        for expr in exprs {
            operands.push(self.analyze_expression(expr)?);
        }
        let mut model = self
            .analyzer
            .error_models
            .resolve(&model_name.name, &operands)
            .map_err(|resolve_error| resolve_error.at(model_name.source_location()))?;
        model.annotations = self.analyze_annotations(&instruction.annotations)?;
        model.copy_location_from(instruction);
        self.program.error_model.set(model);
        Ok(())
    }

    fn analyze_annotations(
        &mut self,
        annotations: &Any<ast::AnnotationData>,
    ) -> Result<Any<semantic::AnnotationData>, AnalysisError> {
        let mut result = Any::new();
        for data in annotations {
            let interface = required(&data.interface, "annotation interface")?;
            let operation = required(&data.operation, "annotation operation")?;
            let mut operands = Any::new();
            if let Some(list) = data.operands.try_get() {
                for expr in &list.items {
                    operands.add(self.analyze_expression(expr)?);
                }
            }
            let mut lowered = semantic::AnnotationData::new(&interface.name, &operation.name);
            lowered.operands = operands;
            lowered.copy_location_from(data);
            result.add(lowered);
        }
        Ok(result)
    }

    //
    // Expressions
    //

    fn analyze_expression(&mut self, expr: &ast::Expression) -> Result<Value, AnalysisError> {
        let mut value = match expr {
            ast::Expression::IntegerLiteral(literal) => ConstInt::new(literal.value).to_value(),
            ast::Expression::FloatLiteral(literal) => ConstReal::new(literal.value).to_value(),
            ast::Expression::StringLiteral(literal) => {
                ConstString::new(literal.value.clone()).to_value()
            }
            ast::Expression::JsonLiteral(literal) => {
                ConstJson::new(literal.value.clone()).to_value()
            }

            ast::Expression::Identifier(identifier) => self
                .mappings
                .resolve(&identifier.name)
                .map_err(|kind| AnalysisError::from(kind).at(identifier.source_location()))?,

            ast::Expression::Index(index) => self.analyze_index(index)?,

            ast::Expression::FunctionCall(call) => {
                let name = required(&call.name, "function name")?;
                let arguments = required(&call.arguments, "function arguments")?;
                let mut args = Vec::with_capacity(arguments.items.len());
                for arg in &arguments.items {
                    args.push(self.analyze_expression(arg)?);
                }
                self.analyzer
                    .functions
                    .call(&name.name, &args)
                    .map_err(|error| error.at(call.source_location()))?
            }

            // Operators lower to function-table calls on synthetic names.
            ast::Expression::Negate(op) => {
                let operand = self.analyze_expression(required(&op.expr, "operand")?)?;
                self.analyzer
                    .functions
                    .call("operator-", &[operand])
                    .map_err(|error| error.at(op.source_location()))?
            }
            ast::Expression::Power(op) => self.analyze_binary("operator**", &op.lhs, &op.rhs, expr)?,
            ast::Expression::Multiply(op) => {
                self.analyze_binary("operator*", &op.lhs, &op.rhs, expr)?
            }
            ast::Expression::Divide(op) => self.analyze_binary("operator/", &op.lhs, &op.rhs, expr)?,
            ast::Expression::Add(op) => self.analyze_binary("operator+", &op.lhs, &op.rhs, expr)?,
            ast::Expression::Subtract(op) => {
                self.analyze_binary("operator-", &op.lhs, &op.rhs, expr)?
            }

            ast::Expression::MatrixLiteral1(literal) => self.analyze_matrix_literal_1(literal)?,
            ast::Expression::MatrixLiteral2(literal) => self.analyze_matrix_literal_2(literal)?,

            ast::Expression::Erroneous(_) => {
                return Err(AnalysisError::new(
                    ErrorKind::ParseError {
                        message: "cannot analyze an expression with parse errors".to_string(),
                    },
                    expr.source_location().cloned(),
                ));
            }
        };
        value.copy_location_from(expr);
        Ok(value)
    }

    fn analyze_binary(
        &mut self,
        name: &str,
        lhs: &One<ast::Expression>,
        rhs: &One<ast::Expression>,
        expr: &ast::Expression,
    ) -> Result<Value, AnalysisError> {
        let lhs = self.analyze_expression(required(lhs, "operand")?)?;
        let rhs = self.analyze_expression(required(rhs, "operand")?)?;
        self.analyzer
            .functions
            .call(name, &[lhs, rhs])
            .map_err(|error| error.at(expr.source_location()))
    }

    // Indexation applies to register references only. Index i of the
    // result refers to entry i of the register's current index list, so
    // indexing a mapped slice of a register selects through it.
    fn analyze_index(&mut self, index: &ast::Index) -> Result<Value, AnalysisError> {
        let target_expr = required(&index.expr, "indexed expression")?;
        let index_list = required(&index.indices, "index list")?;
        let target = self.analyze_expression(target_expr)?;
        match target {
            Value::QubitRefs(refs) => {
                let selected = self.resolve_index_list(index_list, refs.index.len())?;
                Ok(QubitRefs::new(Self::select(&refs.index, selected)).to_value())
            }
            Value::BitRefs(refs) => {
                let selected = self.resolve_index_list(index_list, refs.index.len())?;
                Ok(BitRefs::new(Self::select(&refs.index, selected)).to_value())
            }
            _ => Err(AnalysisError::new(
                ErrorKind::CannotIndex,
                target_expr.source_location().cloned(),
            )),
        }
    }

    fn select(register: &Many<ConstInt>, selected: Vec<ConstInt>) -> Many<ConstInt> {
        selected
            .into_iter()
            .map(|selector| {
                let mut entry = register[selector.value as usize].clone();
                entry.copy_location_from(&selector);
                entry
            })
            .collect()
    }

    // Evaluates and bounds-checks an index list against a register of the
    // given size. Duplicates are permitted here; instructions that
    // disallow qubit reuse police them later.
    fn resolve_index_list(
        &mut self,
        list: &ast::IndexList,
        size: usize,
    ) -> Result<Vec<ConstInt>, AnalysisError> {
        let mut result = Vec::new();
        for entry in &list.items {
            match entry {
                ast::IndexEntry::Item(item) => {
                    let expr = required(&item.index, "index")?;
                    let index = self.index_value(expr)?;
                    if index < 0 || index >= size as i64 {
                        return Err(AnalysisError::new(
                            ErrorKind::IndexOutOfRange { index, size },
                            expr.source_location().cloned(),
                        ));
                    }
                    let mut value = ConstInt::new(index);
                    value.copy_location_from(expr);
                    result.push(value);
                }
                ast::IndexEntry::Range(range) => {
                    let first_expr = required(&range.first, "range start")?;
                    let last_expr = required(&range.last, "range end")?;
                    let first = self.index_value(first_expr)?;
                    let last = self.index_value(last_expr)?;
                    if first < 0 {
                        return Err(AnalysisError::new(
                            ErrorKind::IndexOutOfRange { index: first, size },
                            first_expr.source_location().cloned(),
                        ));
                    }
                    if last >= size as i64 {
                        return Err(AnalysisError::new(
                            ErrorKind::IndexOutOfRange { index: last, size },
                            last_expr.source_location().cloned(),
                        ));
                    }
                    if first > last {
                        return Err(AnalysisError::new(
                            ErrorKind::RangeMalformed { first, last },
                            range.source_location().cloned(),
                        ));
                    }
                    for index in first..=last {
                        let mut value = ConstInt::new(index);
                        value.copy_location_from(range);
                        result.push(value);
                    }
                }
            }
        }
        Ok(result)
    }

    fn index_value(&mut self, expr: &ast::Expression) -> Result<i64, AnalysisError> {
        let value = self.analyze_expression(expr)?;
        match promote(&value, &Type::Int(IsAssignable::False)) {
            Some(Value::ConstInt(index)) => Ok(index.value),
            _ => {
                let kind = match value {
                    Value::QubitRefs(_) | Value::BitRefs(_) => ErrorKind::IndexNotConstant,
                    _ => ErrorKind::IndexNotInteger,
                };
                Err(AnalysisError::new(kind, expr.source_location().cloned()))
            }
        }
    }

    //
    // Matrix literals
    //

    fn analyze_matrix_literal_1(
        &mut self,
        literal: &ast::MatrixLiteral1,
    ) -> Result<Value, AnalysisError> {
        let pairs = required(&literal.pairs, "matrix contents")?;
        let mut cells = Vec::with_capacity(pairs.items.len());
        for expr in &pairs.items {
            cells.push(self.analyze_expression(expr)?);
        }
        if cells.is_empty() {
            return Err(AnalysisError::new(
                ErrorKind::InvalidMatrixLiteral,
                literal.source_location().cloned(),
            ));
        }
        // The flat pair list is a single row; promotion gives it matrix
        // shape when an instruction asks for one.
        let num_cols = cells.len();
        self.build_matrix(cells, num_cols, literal.source_location())
    }

    fn analyze_matrix_literal_2(
        &mut self,
        literal: &ast::MatrixLiteral2,
    ) -> Result<Value, AnalysisError> {
        let mut cells = Vec::new();
        let mut num_cols = 0usize;
        for (row_index, row) in literal.rows.iter().enumerate() {
            if row_index == 0 {
                num_cols = row.items.len();
            } else if row.items.len() != num_cols {
                // Ragged rows.
                return Err(AnalysisError::new(
                    ErrorKind::InvalidMatrixLiteral,
                    literal.source_location().cloned(),
                ));
            }
            for expr in &row.items {
                cells.push(self.analyze_expression(expr)?);
            }
        }
        if cells.is_empty() {
            return Err(AnalysisError::new(
                ErrorKind::InvalidMatrixLiteral,
                literal.source_location().cloned(),
            ));
        }
        self.build_matrix(cells, num_cols, literal.source_location())
    }

    // Tries an all-real matrix first, then an all-complex one.
    fn build_matrix(
        &self,
        cells: Vec<Value>,
        num_cols: usize,
        location: Option<&cq1_tree::SourceLocation>,
    ) -> Result<Value, AnalysisError> {
        match classify_matrix(&cells, num_cols) {
            Some(Either::Left(matrix)) => Ok(ConstRealMatrix::new(matrix).to_value()),
            Some(Either::Right(matrix)) => Ok(ConstComplexMatrix::new(matrix).to_value()),
            None => Err(AnalysisError::new(
                ErrorKind::InvalidMatrixLiteral,
                location.cloned(),
            )),
        }
    }
}

fn classify_matrix(
    cells: &[Value],
    num_cols: usize,
) -> Option<Either<cq1_tree::RMatrix, cq1_tree::CMatrix>> {
    let reals: Option<Vec<f64>> = cells
        .iter()
        .map(|cell| match promote(cell, &Type::Real(IsAssignable::False)) {
            Some(Value::ConstReal(real)) => Some(real.value),
            _ => None,
        })
        .collect();
    if let Some(data) = reals {
        return Some(Either::Left(cq1_tree::RMatrix::from_row_major(
            data, num_cols,
        )));
    }
    let complexes: Option<Vec<cq1_tree::Complex>> = cells
        .iter()
        .map(
            |cell| match promote(cell, &Type::Complex(IsAssignable::False)) {
                Some(Value::ConstComplex(complex)) => Some(complex.value),
                _ => None,
            },
        )
        .collect();
    complexes.map(|data| Either::Right(cq1_tree::CMatrix::from_row_major(data, num_cols)))
}
