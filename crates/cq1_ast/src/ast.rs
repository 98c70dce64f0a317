// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// The node inventory. Variants have the form Xxx(Xxx): the outer name is
// the enum variant, the inner the struct holding the node's children. Child
// field names match the language reference and are relied upon by the
// dumper.

use cq1_tree::{Annotated, Annotations, Any, Many, Maybe, Node, One};

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

//
// Expressions
//

/// Any kind of expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    IntegerLiteral(IntegerLiteral),
    FloatLiteral(FloatLiteral),
    Identifier(Identifier),
    MatrixLiteral1(MatrixLiteral1),
    MatrixLiteral2(MatrixLiteral2),
    StringLiteral(StringLiteral),
    JsonLiteral(JsonLiteral),
    FunctionCall(FunctionCall),
    Index(Index),
    Negate(Negate),
    Power(Power),
    Multiply(Multiply),
    Divide(Divide),
    Add(Add),
    Subtract(Subtract),
    Erroneous(ErroneousExpression),
}

impl Expression {
    /// Returns the identifier when this expression is syntactically a bare
    /// identifier.
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }
}

impl Node for Expression {
    fn is_complete(&self) -> bool {
        match self {
            Expression::IntegerLiteral(node) => node.is_complete(),
            Expression::FloatLiteral(node) => node.is_complete(),
            Expression::Identifier(node) => node.is_complete(),
            Expression::MatrixLiteral1(node) => node.is_complete(),
            Expression::MatrixLiteral2(node) => node.is_complete(),
            Expression::StringLiteral(node) => node.is_complete(),
            Expression::JsonLiteral(node) => node.is_complete(),
            Expression::FunctionCall(node) => node.is_complete(),
            Expression::Index(node) => node.is_complete(),
            Expression::Negate(node) => node.is_complete(),
            Expression::Power(node) => node.is_complete(),
            Expression::Multiply(node) => node.is_complete(),
            Expression::Divide(node) => node.is_complete(),
            Expression::Add(node) => node.is_complete(),
            Expression::Subtract(node) => node.is_complete(),
            Expression::Erroneous(node) => node.is_complete(),
        }
    }
}

impl Annotated for Expression {
    fn meta(&self) -> &Annotations {
        match self {
            Expression::IntegerLiteral(node) => node.meta(),
            Expression::FloatLiteral(node) => node.meta(),
            Expression::Identifier(node) => node.meta(),
            Expression::MatrixLiteral1(node) => node.meta(),
            Expression::MatrixLiteral2(node) => node.meta(),
            Expression::StringLiteral(node) => node.meta(),
            Expression::JsonLiteral(node) => node.meta(),
            Expression::FunctionCall(node) => node.meta(),
            Expression::Index(node) => node.meta(),
            Expression::Negate(node) => node.meta(),
            Expression::Power(node) => node.meta(),
            Expression::Multiply(node) => node.meta(),
            Expression::Divide(node) => node.meta(),
            Expression::Add(node) => node.meta(),
            Expression::Subtract(node) => node.meta(),
            Expression::Erroneous(node) => node.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        match self {
            Expression::IntegerLiteral(node) => node.meta_mut(),
            Expression::FloatLiteral(node) => node.meta_mut(),
            Expression::Identifier(node) => node.meta_mut(),
            Expression::MatrixLiteral1(node) => node.meta_mut(),
            Expression::MatrixLiteral2(node) => node.meta_mut(),
            Expression::StringLiteral(node) => node.meta_mut(),
            Expression::JsonLiteral(node) => node.meta_mut(),
            Expression::FunctionCall(node) => node.meta_mut(),
            Expression::Index(node) => node.meta_mut(),
            Expression::Negate(node) => node.meta_mut(),
            Expression::Power(node) => node.meta_mut(),
            Expression::Multiply(node) => node.meta_mut(),
            Expression::Divide(node) => node.meta_mut(),
            Expression::Add(node) => node.meta_mut(),
            Expression::Subtract(node) => node.meta_mut(),
            Expression::Erroneous(node) => node.meta_mut(),
        }
    }
}

/// An integer literal.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    pub meta: Annotations,
}

impl IntegerLiteral {
    pub fn new(value: i64) -> IntegerLiteral {
        IntegerLiteral {
            value,
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::IntegerLiteral(self)
    }
}

impl Node for IntegerLiteral {}

/// A floating point literal.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub meta: Annotations,
}

impl FloatLiteral {
    pub fn new(value: f64) -> FloatLiteral {
        FloatLiteral {
            value,
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::FloatLiteral(self)
    }
}

impl Node for FloatLiteral {}

/// An identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub meta: Annotations,
}

impl Identifier {
    pub fn new<T: Into<String>>(name: T) -> Identifier {
        Identifier {
            name: name.into(),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Identifier(self)
    }
}

impl Node for Identifier {}

/// A string literal. Holds the text with escape sequences already
/// resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub meta: Annotations,
}

impl StringLiteral {
    pub fn new<T: Into<String>>(value: T) -> StringLiteral {
        StringLiteral {
            value: value.into(),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::StringLiteral(self)
    }
}

impl Node for StringLiteral {}

/// A JSON literal. Holds the raw `{…}` text verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct JsonLiteral {
    pub value: String,
    pub meta: Annotations,
}

impl JsonLiteral {
    pub fn new<T: Into<String>>(value: T) -> JsonLiteral {
        JsonLiteral {
            value: value.into(),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::JsonLiteral(self)
    }
}

impl Node for JsonLiteral {}

/// A square matrix given as a flat row-major list of real/imaginary
/// expression pairs.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixLiteral1 {
    pub pairs: One<ExpressionList>,
    pub meta: Annotations,
}

impl MatrixLiteral1 {
    pub fn new(pairs: ExpressionList) -> MatrixLiteral1 {
        MatrixLiteral1 {
            pairs: One::new(pairs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::MatrixLiteral1(self)
    }
}

impl Node for MatrixLiteral1 {
    fn is_complete(&self) -> bool {
        self.pairs.is_complete()
    }
}

/// A rectangular matrix given as a list of rows.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixLiteral2 {
    pub rows: Many<ExpressionList>,
    pub meta: Annotations,
}

impl MatrixLiteral2 {
    pub fn new(rows: Vec<ExpressionList>) -> MatrixLiteral2 {
        MatrixLiteral2 {
            rows: Many::from_vec(rows),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::MatrixLiteral2(self)
    }
}

impl Node for MatrixLiteral2 {
    fn is_complete(&self) -> bool {
        self.rows.is_complete()
    }
}

/// A function call.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionCall {
    pub name: One<Identifier>,
    pub arguments: One<ExpressionList>,
    pub meta: Annotations,
}

impl FunctionCall {
    pub fn new(name: Identifier, arguments: ExpressionList) -> FunctionCall {
        FunctionCall {
            name: One::new(name),
            arguments: One::new(arguments),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::FunctionCall(self)
    }
}

impl Node for FunctionCall {
    fn is_complete(&self) -> bool {
        self.name.is_complete() && self.arguments.is_complete()
    }
}

/// An indexation expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Index {
    pub expr: One<Expression>,
    pub indices: One<IndexList>,
    pub meta: Annotations,
}

impl Index {
    pub fn new(expr: Expression, indices: IndexList) -> Index {
        Index {
            expr: One::new(expr),
            indices: One::new(indices),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Index(self)
    }
}

impl Node for Index {
    fn is_complete(&self) -> bool {
        self.expr.is_complete() && self.indices.is_complete()
    }
}

/// Negation operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Negate {
    pub expr: One<Expression>,
    pub meta: Annotations,
}

impl Negate {
    pub fn new(expr: Expression) -> Negate {
        Negate {
            expr: One::new(expr),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Negate(self)
    }
}

impl Node for Negate {
    fn is_complete(&self) -> bool {
        self.expr.is_complete()
    }
}

/// Power operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Power {
    pub lhs: One<Expression>,
    pub rhs: One<Expression>,
    pub meta: Annotations,
}

impl Power {
    pub fn new(lhs: Expression, rhs: Expression) -> Power {
        Power {
            lhs: One::new(lhs),
            rhs: One::new(rhs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Power(self)
    }
}

impl Node for Power {
    fn is_complete(&self) -> bool {
        self.lhs.is_complete() && self.rhs.is_complete()
    }
}

/// Multiplication operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Multiply {
    pub lhs: One<Expression>,
    pub rhs: One<Expression>,
    pub meta: Annotations,
}

impl Multiply {
    pub fn new(lhs: Expression, rhs: Expression) -> Multiply {
        Multiply {
            lhs: One::new(lhs),
            rhs: One::new(rhs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Multiply(self)
    }
}

impl Node for Multiply {
    fn is_complete(&self) -> bool {
        self.lhs.is_complete() && self.rhs.is_complete()
    }
}

/// Division operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Divide {
    pub lhs: One<Expression>,
    pub rhs: One<Expression>,
    pub meta: Annotations,
}

impl Divide {
    pub fn new(lhs: Expression, rhs: Expression) -> Divide {
        Divide {
            lhs: One::new(lhs),
            rhs: One::new(rhs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Divide(self)
    }
}

impl Node for Divide {
    fn is_complete(&self) -> bool {
        self.lhs.is_complete() && self.rhs.is_complete()
    }
}

/// Addition operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Add {
    pub lhs: One<Expression>,
    pub rhs: One<Expression>,
    pub meta: Annotations,
}

impl Add {
    pub fn new(lhs: Expression, rhs: Expression) -> Add {
        Add {
            lhs: One::new(lhs),
            rhs: One::new(rhs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Add(self)
    }
}

impl Node for Add {
    fn is_complete(&self) -> bool {
        self.lhs.is_complete() && self.rhs.is_complete()
    }
}

/// Subtraction operator.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtract {
    pub lhs: One<Expression>,
    pub rhs: One<Expression>,
    pub meta: Annotations,
}

impl Subtract {
    pub fn new(lhs: Expression, rhs: Expression) -> Subtract {
        Subtract {
            lhs: One::new(lhs),
            rhs: One::new(rhs),
            meta: Annotations::new(),
        }
    }

    pub fn to_expression(self) -> Expression {
        Expression::Subtract(self)
    }
}

impl Node for Subtract {
    fn is_complete(&self) -> bool {
        self.lhs.is_complete() && self.rhs.is_complete()
    }
}

/// Placeholder for an expression with a parse error.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ErroneousExpression {
    pub meta: Annotations,
}

impl ErroneousExpression {
    pub fn new() -> ErroneousExpression {
        ErroneousExpression::default()
    }

    pub fn to_expression(self) -> Expression {
        Expression::Erroneous(self)
    }
}

impl Node for ErroneousExpression {
    fn is_complete(&self) -> bool {
        false
    }
}

/// A comma-separated list of expressions.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ExpressionList {
    pub items: Any<Expression>,
    pub meta: Annotations,
}

impl ExpressionList {
    pub fn new() -> ExpressionList {
        ExpressionList::default()
    }

    pub fn from_vec(items: Vec<Expression>) -> ExpressionList {
        ExpressionList {
            items: Any::from_vec(items),
            meta: Annotations::new(),
        }
    }
}

impl Node for ExpressionList {
    fn is_complete(&self) -> bool {
        self.items.is_complete()
    }
}

//
// Indexation
//

/// An entry in an index list: a single index or an inclusive range.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexEntry {
    Item(IndexItem),
    Range(IndexRange),
}

impl Node for IndexEntry {
    fn is_complete(&self) -> bool {
        match self {
            IndexEntry::Item(node) => node.is_complete(),
            IndexEntry::Range(node) => node.is_complete(),
        }
    }
}

impl Annotated for IndexEntry {
    fn meta(&self) -> &Annotations {
        match self {
            IndexEntry::Item(node) => node.meta(),
            IndexEntry::Range(node) => node.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        match self {
            IndexEntry::Item(node) => node.meta_mut(),
            IndexEntry::Range(node) => node.meta_mut(),
        }
    }
}

/// A single index in an index list.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexItem {
    pub index: One<Expression>,
    pub meta: Annotations,
}

impl IndexItem {
    pub fn new(index: Expression) -> IndexItem {
        IndexItem {
            index: One::new(index),
            meta: Annotations::new(),
        }
    }

    pub fn to_entry(self) -> IndexEntry {
        IndexEntry::Item(self)
    }
}

impl Node for IndexItem {
    fn is_complete(&self) -> bool {
        self.index.is_complete()
    }
}

/// An inclusive range of indices in an index list.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexRange {
    pub first: One<Expression>,
    pub last: One<Expression>,
    pub meta: Annotations,
}

impl IndexRange {
    pub fn new(first: Expression, last: Expression) -> IndexRange {
        IndexRange {
            first: One::new(first),
            last: One::new(last),
            meta: Annotations::new(),
        }
    }

    pub fn to_entry(self) -> IndexEntry {
        IndexEntry::Range(self)
    }
}

impl Node for IndexRange {
    fn is_complete(&self) -> bool {
        self.first.is_complete() && self.last.is_complete()
    }
}

/// A list of one or more indices.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct IndexList {
    pub items: Many<IndexEntry>,
    pub meta: Annotations,
}

impl IndexList {
    pub fn new() -> IndexList {
        IndexList::default()
    }

    pub fn from_vec(items: Vec<IndexEntry>) -> IndexList {
        IndexList {
            items: Many::from_vec(items),
            meta: Annotations::new(),
        }
    }
}

impl Node for IndexList {
    fn is_complete(&self) -> bool {
        self.items.is_complete()
    }
}

//
// Annotations (the language construct, not the metadata store)
//

/// An `@interface.operation(operands)` annotation. Targets that do not
/// support the interface silently ignore it.
#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationData {
    pub interface: One<Identifier>,
    pub operation: One<Identifier>,
    pub operands: Maybe<ExpressionList>,
    pub meta: Annotations,
}

impl AnnotationData {
    pub fn new(
        interface: Identifier,
        operation: Identifier,
        operands: Option<ExpressionList>,
    ) -> AnnotationData {
        AnnotationData {
            interface: One::new(interface),
            operation: One::new(operation),
            operands: Maybe::from(operands),
            meta: Annotations::new(),
        }
    }
}

impl Node for AnnotationData {
    fn is_complete(&self) -> bool {
        self.interface.is_complete() && self.operation.is_complete() && self.operands.is_complete()
    }
}

//
// Instructions and statements
//

/// Any kind of instruction. Not itself a statement: instructions are
/// always part of a bundle, even when alone on a line.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub name: One<Identifier>,
    pub condition: Maybe<Expression>,
    pub operands: One<ExpressionList>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Instruction {
    pub fn new(
        name: Identifier,
        condition: Option<Expression>,
        operands: ExpressionList,
    ) -> Instruction {
        Instruction {
            name: One::new(name),
            condition: Maybe::from(condition),
            operands: One::new(operands),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }
}

impl Node for Instruction {
    fn is_complete(&self) -> bool {
        self.name.is_complete()
            && self.condition.is_complete()
            && self.operands.is_complete()
            && self.annotations.is_complete()
    }
}

/// Any kind of statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Bundle(Bundle),
    Mapping(Mapping),
    Subcircuit(Subcircuit),
    Erroneous(ErroneousStatement),
}

impl Node for Statement {
    fn is_complete(&self) -> bool {
        match self {
            Statement::Bundle(node) => node.is_complete(),
            Statement::Mapping(node) => node.is_complete(),
            Statement::Subcircuit(node) => node.is_complete(),
            Statement::Erroneous(node) => node.is_complete(),
        }
    }
}

impl Annotated for Statement {
    fn meta(&self) -> &Annotations {
        match self {
            Statement::Bundle(node) => node.meta(),
            Statement::Mapping(node) => node.meta(),
            Statement::Subcircuit(node) => node.meta(),
            Statement::Erroneous(node) => node.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        match self {
            Statement::Bundle(node) => node.meta_mut(),
            Statement::Mapping(node) => node.meta_mut(),
            Statement::Subcircuit(node) => node.meta_mut(),
            Statement::Erroneous(node) => node.meta_mut(),
        }
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

    pub fn to_statement(self) -> Statement {
        Statement::Bundle(self)
    }
}

impl Node for Bundle {
    fn is_complete(&self) -> bool {
        self.items.is_complete() && self.annotations.is_complete()
    }
}

/// A name bound to an expression. Originally just a way of naming a single
/// qubit.
#[derive(Clone, Debug, PartialEq)]
pub struct Mapping {
    pub alias: One<Identifier>,
    pub expr: One<Expression>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Mapping {
    pub fn new(alias: Identifier, expr: Expression) -> Mapping {
        Mapping {
            alias: One::new(alias),
            expr: One::new(expr),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }

    pub fn to_statement(self) -> Statement {
        Statement::Mapping(self)
    }
}

impl Node for Mapping {
    fn is_complete(&self) -> bool {
        self.alias.is_complete() && self.expr.is_complete() && self.annotations.is_complete()
    }
}

/// A subcircuit header: a label with an optional iteration count.
#[derive(Clone, Debug, PartialEq)]
pub struct Subcircuit {
    pub name: One<Identifier>,
    pub iterations: Maybe<Expression>,
    pub annotations: Any<AnnotationData>,
    pub meta: Annotations,
}

impl Subcircuit {
    pub fn new(name: Identifier, iterations: Option<Expression>) -> Subcircuit {
        Subcircuit {
            name: One::new(name),
            iterations: Maybe::from(iterations),
            annotations: Any::new(),
            meta: Annotations::new(),
        }
    }

    pub fn to_statement(self) -> Statement {
        Statement::Subcircuit(self)
    }
}

impl Node for Subcircuit {
    fn is_complete(&self) -> bool {
        self.name.is_complete() && self.iterations.is_complete() && self.annotations.is_complete()
    }
}

/// Placeholder for a statement with a parse error.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ErroneousStatement {
    pub meta: Annotations,
}

impl ErroneousStatement {
    pub fn new() -> ErroneousStatement {
        ErroneousStatement::default()
    }

    pub fn to_statement(self) -> Statement {
        Statement::Erroneous(self)
    }
}

impl Node for ErroneousStatement {
    fn is_complete(&self) -> bool {
        false
    }
}

/// The list of statements of a program.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StatementList {
    pub items: Any<Statement>,
    pub meta: Annotations,
}

impl StatementList {
    pub fn new() -> StatementList {
        StatementList::default()
    }

    pub fn from_vec(items: Vec<Statement>) -> StatementList {
        StatementList {
            items: Any::from_vec(items),
            meta: Annotations::new(),
        }
    }
}

impl Node for StatementList {
    fn is_complete(&self) -> bool {
        self.items.is_complete()
    }
}

//
// Program structure
//

/// The file version identifier, components ordered major to minor.
/// Complete only when non-empty.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Version {
    pub items: Vec<i64>,
    pub meta: Annotations,
}

impl Version {
    pub fn new(items: Vec<i64>) -> Version {
        Version {
            items,
            meta: Annotations::new(),
        }
    }
}

impl Node for Version {
    fn is_complete(&self) -> bool {
        !self.items.is_empty()
    }
}

/// Any root node for the tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Root {
    Program(Program),
    Erroneous(ErroneousProgram),
}

impl Root {
    pub fn as_program(&self) -> Option<&Program> {
        match self {
            Root::Program(program) => Some(program),
            Root::Erroneous(_) => None,
        }
    }
}

impl Node for Root {
    fn is_complete(&self) -> bool {
        match self {
            Root::Program(node) => node.is_complete(),
            Root::Erroneous(node) => node.is_complete(),
        }
    }
}

impl Annotated for Root {
    fn meta(&self) -> &Annotations {
        match self {
            Root::Program(node) => node.meta(),
            Root::Erroneous(node) => node.meta(),
        }
    }

    fn meta_mut(&mut self) -> &mut Annotations {
        match self {
            Root::Program(node) => node.meta_mut(),
            Root::Erroneous(node) => node.meta_mut(),
        }
    }
}

/// A complete program: version, qubit count, and statements.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub version: One<Version>,
    pub num_qubits: One<Expression>,
    pub statements: One<StatementList>,
    pub meta: Annotations,
}

impl Program {
    pub fn new(version: Version, num_qubits: Expression, statements: StatementList) -> Program {
        Program {
            version: One::new(version),
            num_qubits: One::new(num_qubits),
            statements: One::new(statements),
            meta: Annotations::new(),
        }
    }

    pub fn to_root(self) -> Root {
        Root::Program(self)
    }
}

impl Node for Program {
    fn is_complete(&self) -> bool {
        self.version.is_complete() && self.num_qubits.is_complete() && self.statements.is_complete()
    }
}

/// Placeholder for a program with a parse error.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ErroneousProgram {
    pub meta: Annotations,
}

impl ErroneousProgram {
    pub fn new() -> ErroneousProgram {
        ErroneousProgram::default()
    }

    pub fn to_root(self) -> Root {
        Root::Erroneous(self)
    }
}

impl Node for ErroneousProgram {
    fn is_complete(&self) -> bool {
        false
    }
}

impl_annotated!(
    IntegerLiteral,
    FloatLiteral,
    Identifier,
    StringLiteral,
    JsonLiteral,
    MatrixLiteral1,
    MatrixLiteral2,
    FunctionCall,
    Index,
    Negate,
    Power,
    Multiply,
    Divide,
    Add,
    Subtract,
    ErroneousExpression,
    ExpressionList,
    IndexItem,
    IndexRange,
    IndexList,
    AnnotationData,
    Instruction,
    Bundle,
    Mapping,
    Subcircuit,
    ErroneousStatement,
    StatementList,
    Version,
    Program,
    ErroneousProgram,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Expression {
        IntegerLiteral::new(value).to_expression()
    }

    #[test]
    fn test_completeness_recurses() {
        let call = FunctionCall::new(
            Identifier::new("sqrt"),
            ExpressionList::from_vec(vec![int(2)]),
        );
        assert!(call.is_complete());

        let bad = FunctionCall::new(
            Identifier::new("sqrt"),
            ExpressionList::from_vec(vec![ErroneousExpression::new().to_expression()]),
        );
        assert!(!bad.is_complete());
    }

    #[test]
    fn test_one_slot_must_be_populated() {
        let mut instruction = Instruction::new(Identifier::new("h"), None, ExpressionList::new());
        assert!(instruction.is_complete());
        instruction.operands.reset();
        assert!(!instruction.is_complete());
    }

    #[test]
    fn test_index_list_must_be_non_empty() {
        let list = IndexList::new();
        assert!(!list.is_complete());
        let list = IndexList::from_vec(vec![IndexItem::new(int(0)).to_entry()]);
        assert!(list.is_complete());
    }

    #[test]
    fn test_equality_ignores_annotations() {
        use cq1_tree::SourceLocation;
        let mut a = Identifier::new("q");
        let b = Identifier::new("q");
        a.set_source_location(SourceLocation::new("f", 1, 1, 1, 2));
        assert_eq!(a, b);
        assert_ne!(a, Identifier::new("b"));
    }

    #[test]
    fn test_erroneous_statement_forces_incomplete_program() {
        let program = Program::new(
            Version::new(vec![1, 0]),
            int(3),
            StatementList::from_vec(vec![ErroneousStatement::new().to_statement()]),
        );
        assert!(!program.is_complete());
    }
}
