// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Program and statement grammar. Expression grammar lives in
// expressions.rs.
//
// Statements are newline-terminated. A statement that fails to parse is
// recorded as an ErroneousStatement and the parser resumes after the next
// newline, so one bad line yields exactly one error.

use cq1_ast::ast;
use cq1_lexer::{LiteralKind, TokenKind};
use cq1_tree::{Annotated, Annotations, Any, One, SourceLocation};

use crate::error::ParseError;
use crate::tokens::Tokens;

/// Result of parsing one source text: the root node and the errors found.
/// The root is an `ErroneousProgram` when not even the version statement
/// could be made sense of.
pub struct ParseOutput {
    pub root: One<ast::Root>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses a source text. `file_name` is used in source locations and
/// diagnostics only.
pub fn parse_source(source: &str, file_name: Option<&str>) -> ParseOutput {
    let mut parser = Parser::new(source, file_name);
    let root = parser.parse_root();
    ParseOutput {
        root: One::new(root),
        errors: parser.errors,
    }
}

// Statement- and expression-level productions return this; `Err` means an
// error has already been recorded and the caller should recover.
pub(crate) type Parsed<T> = Result<T, ()>;

pub(crate) struct Parser<'a> {
    pub(crate) tokens: Tokens<'a>,
    file_name: String,
    pub(crate) errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, file_name: Option<&str>) -> Parser<'a> {
        Parser {
            tokens: Tokens::new(source),
            file_name: file_name.unwrap_or("<unknown>").to_string(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.tokens.current() == kind
    }

    // Keywords are case-insensitive, like everything else in the language.
    fn at_keyword(&self, keyword: &str) -> bool {
        self.at(TokenKind::Ident) && self.tokens.text().eq_ignore_ascii_case(keyword)
    }

    pub(crate) fn bump(&mut self) {
        self.tokens.bump();
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.bump();
        }
    }

    pub(crate) fn start(&self) -> u32 {
        self.tokens.current_start()
    }

    /// Location spanning `start` to the end of the last consumed token.
    pub(crate) fn location_from(&self, start: u32) -> SourceLocation {
        self.tokens
            .location(&self.file_name, start, self.tokens.last_end())
    }

    fn current_location(&self) -> SourceLocation {
        let start = self.tokens.current_start();
        let end = start + self.tokens.text().len() as u32;
        self.tokens.location(&self.file_name, start, end)
    }

    pub(crate) fn error_here<T: Into<String>>(&mut self, message: T) {
        let start = self.tokens.current_start() as usize;
        let end = start + self.tokens.text().len();
        self.errors.push(ParseError::new(
            message,
            Some(self.current_location()),
            Some(start..end),
        ));
    }

    pub(crate) fn found(&self) -> String {
        match self.tokens.current() {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            TokenKind::Literal {
                kind: LiteralKind::Str { .. },
            } => "a string literal".to_string(),
            _ => format!("`{}`", self.tokens.text()),
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> Parsed<()> {
        if self.at(kind) {
            self.bump();
            Ok(())
        } else {
            self.error_here(format!("expected {}, found {}", what, self.found()));
            Err(())
        }
    }

    pub(crate) fn expect_ident(&mut self, what: &str) -> Parsed<ast::Identifier> {
        if !self.at(TokenKind::Ident) {
            self.error_here(format!("expected {}, found {}", what, self.found()));
            return Err(());
        }
        let start = self.start();
        let identifier = ast::Identifier::new(self.tokens.text());
        self.bump();
        Ok(identifier.with_location(self.location_from(start)))
    }

    pub(crate) fn parse_int_literal(&mut self) -> Parsed<i64> {
        match self.tokens.text().parse::<i64>() {
            Ok(value) => {
                self.bump();
                Ok(value)
            }
            Err(_) => {
                self.error_here("integer literal out of range");
                Err(())
            }
        }
    }

    // Skips to just past the next newline so the next statement parses on
    // a clean line.
    fn recover_statement(&mut self) {
        loop {
            match self.tokens.current() {
                TokenKind::Newline => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => break,
                _ => self.bump(),
            }
        }
    }

    fn expect_end_of_line(&mut self) {
        if !self.at(TokenKind::Eof) && self.expect(TokenKind::Newline, "end of line").is_err() {
            self.recover_statement();
        }
    }

    //
    // Program structure
    //

    fn parse_root(&mut self) -> ast::Root {
        let start = self.start();
        self.skip_newlines();

        if !self.at_keyword("version") {
            self.error_here(format!("expected version statement, found {}", self.found()));
            return ast::ErroneousProgram::new()
                .with_location(self.location_from(start))
                .to_root();
        }
        self.bump();
        let version = match self.parse_version() {
            Ok(version) => version,
            Err(()) => {
                return ast::ErroneousProgram::new()
                    .with_location(self.location_from(start))
                    .to_root();
            }
        };
        self.expect_end_of_line();
        self.skip_newlines();

        let mut num_qubits = One::empty();
        if self.at_keyword("qubits") {
            self.bump();
            match self.parse_expression() {
                Ok(expr) => {
                    num_qubits.set(expr);
                    self.expect_end_of_line();
                }
                Err(()) => self.recover_statement(),
            }
        } else {
            self.error_here(format!("expected qubits statement, found {}", self.found()));
        }

        let statements = self.parse_statement_list();
        let mut program = ast::Program {
            version: One::new(version),
            num_qubits,
            statements: One::new(statements),
            meta: Annotations::new(),
        };
        program.set_source_location(self.location_from(start));
        ast::Root::Program(program)
    }

    fn parse_version(&mut self) -> Parsed<ast::Version> {
        let start = self.start();
        let mut items = Vec::new();
        loop {
            self.parse_version_component(&mut items)?;
            if self.at(TokenKind::Dot) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(ast::Version::new(items).with_location(self.location_from(start)))
    }

    // `1.0` reaches us as a float token and contributes two components.
    fn parse_version_component(&mut self, items: &mut Vec<i64>) -> Parsed<()> {
        match self.tokens.current() {
            TokenKind::Literal {
                kind: LiteralKind::Int,
            } => {
                let value = self.parse_int_literal()?;
                items.push(value);
                Ok(())
            }
            TokenKind::Literal {
                kind:
                    LiteralKind::Float {
                        empty_exponent: false,
                    },
            } => {
                let mut parts = Vec::new();
                for part in self.tokens.text().split('.') {
                    match part.parse::<i64>() {
                        Ok(value) => parts.push(value),
                        Err(_) => {
                            self.error_here("invalid version number");
                            return Err(());
                        }
                    }
                }
                self.bump();
                items.extend(parts);
                Ok(())
            }
            _ => {
                self.error_here(format!("expected version number, found {}", self.found()));
                Err(())
            }
        }
    }

    fn parse_statement_list(&mut self) -> ast::StatementList {
        let start = self.start();
        let mut items = Vec::new();
        loop {
            self.skip_newlines();
            if self.at(TokenKind::Eof) {
                break;
            }
            let statement_start = self.start();
            match self.parse_statement() {
                Ok(statement) => {
                    items.push(statement);
                    self.expect_end_of_line();
                }
                Err(()) => {
                    self.recover_statement();
                    items.push(
                        ast::ErroneousStatement::new()
                            .with_location(self.location_from(statement_start))
                            .to_statement(),
                    );
                }
            }
        }
        ast::StatementList::from_vec(items).with_location(self.location_from(start))
    }

    //
    // Statements
    //

    fn parse_statement(&mut self) -> Parsed<ast::Statement> {
        match self.tokens.current() {
            TokenKind::Dot => self.parse_subcircuit(),
            TokenKind::OpenBrace => self.parse_braced_bundle(),
            TokenKind::Ident if self.at_keyword("map") => self.parse_mapping(),
            TokenKind::Ident => self.parse_bundle_line(),
            _ => {
                self.error_here(format!("expected statement, found {}", self.found()));
                Err(())
            }
        }
    }

    fn parse_subcircuit(&mut self) -> Parsed<ast::Statement> {
        let start = self.start();
        self.bump(); // `.`
        let name = self.expect_ident("subcircuit name")?;
        let mut iterations = None;
        if self.at(TokenKind::OpenParen) {
            self.bump();
            iterations = Some(self.parse_expression()?);
            self.expect(TokenKind::CloseParen, "`)`")?;
        }
        let mut subcircuit = ast::Subcircuit::new(name, iterations);
        subcircuit.annotations = self.parse_annotations()?;
        Ok(subcircuit
            .with_location(self.location_from(start))
            .to_statement())
    }

    fn parse_mapping(&mut self) -> Parsed<ast::Statement> {
        let start = self.start();
        self.bump(); // `map`
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Comma, "`,`")?;
        let alias = self.expect_ident("mapping alias")?;
        let mut mapping = ast::Mapping::new(alias, expr);
        mapping.annotations = self.parse_annotations()?;
        Ok(mapping
            .with_location(self.location_from(start))
            .to_statement())
    }

    // A line of one or more `|`-separated instructions.
    fn parse_bundle_line(&mut self) -> Parsed<ast::Statement> {
        let start = self.start();
        let mut items = vec![self.parse_instruction()?];
        while self.at(TokenKind::Pipe) {
            self.bump();
            items.push(self.parse_instruction()?);
        }
        Ok(ast::Bundle::new(items)
            .with_location(self.location_from(start))
            .to_statement())
    }

    // `{ ... }`, where both `|` and newlines separate the instructions.
    fn parse_braced_bundle(&mut self) -> Parsed<ast::Statement> {
        let start = self.start();
        self.bump(); // `{`
        self.skip_newlines();
        let mut items = Vec::new();
        loop {
            items.push(self.parse_instruction()?);
            if self.at(TokenKind::Pipe) {
                self.bump();
                self.skip_newlines();
                continue;
            }
            if self.at(TokenKind::Newline) {
                self.skip_newlines();
                if self.at(TokenKind::CloseBrace) {
                    break;
                }
                continue;
            }
            if self.at(TokenKind::CloseBrace) {
                break;
            }
            self.error_here(format!(
                "expected `|`, `}}`, or end of line, found {}",
                self.found()
            ));
            return Err(());
        }
        self.bump(); // `}`
        let mut bundle = ast::Bundle::new(items);
        bundle.annotations = self.parse_annotations()?;
        Ok(bundle
            .with_location(self.location_from(start))
            .to_statement())
    }

    fn parse_instruction(&mut self) -> Parsed<ast::Instruction> {
        let start = self.start();
        if !self.at(TokenKind::Ident) {
            self.error_here(format!("expected instruction name, found {}", self.found()));
            return Err(());
        }

        // Conditional form: the `c`, `-`, and name tokens must be glued
        // together, so `c - x` stays three ordinary tokens.
        let mut conditional = false;
        if self.tokens.text().eq_ignore_ascii_case("c")
            && self.tokens.nth(1) == TokenKind::Minus
            && self.tokens.glued(1)
            && self.tokens.nth(2) == TokenKind::Ident
            && self.tokens.glued(2)
        {
            conditional = true;
            self.bump(); // `c`
            self.bump(); // `-`
        }
        let name_start = self.start();
        let name = ast::Identifier::new(self.tokens.text());
        self.bump();
        let name = name.with_location(self.location_from(name_start));

        let operands_start = self.start();
        let mut operands = Vec::new();
        if self.at_operand_start() {
            operands.push(self.parse_expression()?);
            while self.at(TokenKind::Comma) {
                self.bump();
                operands.push(self.parse_expression()?);
            }
        }

        // For `c-` instructions the first comma-separated item is the
        // condition, not an operand.
        let mut condition = None;
        if conditional {
            if operands.is_empty() {
                self.error_here("conditional instruction requires a condition operand");
                return Err(());
            }
            condition = Some(operands.remove(0));
        }

        let operand_list = ast::ExpressionList::from_vec(operands)
            .with_location(self.location_from(operands_start));
        let mut instruction = ast::Instruction::new(name, condition, operand_list);
        instruction.annotations = self.parse_annotations()?;
        Ok(instruction.with_location(self.location_from(start)))
    }

    fn at_operand_start(&self) -> bool {
        !matches!(
            self.tokens.current(),
            TokenKind::Newline
                | TokenKind::Pipe
                | TokenKind::CloseBrace
                | TokenKind::At
                | TokenKind::Eof
        )
    }

    fn parse_annotations(&mut self) -> Parsed<Any<ast::AnnotationData>> {
        let mut annotations = Any::new();
        while self.at(TokenKind::At) {
            let start = self.start();
            self.bump(); // `@`
            let interface = self.expect_ident("annotation interface")?;
            self.expect(TokenKind::Dot, "`.`")?;
            let operation = self.expect_ident("annotation operation")?;
            let mut operands = None;
            if self.at(TokenKind::OpenParen) {
                self.bump();
                operands = Some(self.parse_expression_list(&[TokenKind::CloseParen])?);
                self.expect(TokenKind::CloseParen, "`)`")?;
            }
            annotations.add(
                ast::AnnotationData::new(interface, operation, operands)
                    .with_location(self.location_from(start)),
            );
        }
        Ok(annotations)
    }
}
