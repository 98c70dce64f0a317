// Copyright contributors to the cqasm-parser project
// SPDX-License-Identifier: Apache-2.0

// Expression grammar, precedence low to high:
//   additive (+ -) < multiplicative (* /) < power (**, right-assoc)
//   < unary minus < indexation < primary.
// `**` is two glued `*` tokens.

use cq1_ast::ast;
use cq1_lexer::unescape::unescape_str;
use cq1_lexer::{scan_json_literal, LiteralKind, TokenKind};
use cq1_tree::Annotated;

use crate::parser::{Parsed, Parser};

impl Parser<'_> {
    pub(crate) fn parse_expression(&mut self) -> Parsed<ast::Expression> {
        self.parse_additive()
    }

    /// Comma-separated expressions, empty when the next token is in
    /// `stop`.
    pub(crate) fn parse_expression_list(
        &mut self,
        stop: &[TokenKind],
    ) -> Parsed<ast::ExpressionList> {
        let start = self.start();
        let mut items = Vec::new();
        if !stop.contains(&self.tokens.current()) {
            items.push(self.parse_expression()?);
            while self.at(TokenKind::Comma) {
                self.bump();
                items.push(self.parse_expression()?);
            }
        }
        Ok(ast::ExpressionList::from_vec(items).with_location(self.location_from(start)))
    }

    fn parse_additive(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        let mut lhs = self.parse_multiplicative()?;
        loop {
            if self.at(TokenKind::Plus) {
                self.bump();
                let rhs = self.parse_multiplicative()?;
                lhs = ast::Add::new(lhs, rhs)
                    .with_location(self.location_from(start))
                    .to_expression();
            } else if self.at(TokenKind::Minus) {
                self.bump();
                let rhs = self.parse_multiplicative()?;
                lhs = ast::Subtract::new(lhs, rhs)
                    .with_location(self.location_from(start))
                    .to_expression();
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_multiplicative(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        let mut lhs = self.parse_power()?;
        loop {
            if self.at(TokenKind::Star) {
                self.bump();
                let rhs = self.parse_power()?;
                lhs = ast::Multiply::new(lhs, rhs)
                    .with_location(self.location_from(start))
                    .to_expression();
            } else if self.at(TokenKind::Slash) {
                self.bump();
                let rhs = self.parse_power()?;
                lhs = ast::Divide::new(lhs, rhs)
                    .with_location(self.location_from(start))
                    .to_expression();
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_power(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        let lhs = self.parse_unary()?;
        if self.at(TokenKind::Star) && self.tokens.nth(1) == TokenKind::Star && self.tokens.glued(1)
        {
            self.bump();
            self.bump();
            // Right-associative.
            let rhs = self.parse_power()?;
            return Ok(ast::Power::new(lhs, rhs)
                .with_location(self.location_from(start))
                .to_expression());
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Parsed<ast::Expression> {
        if self.at(TokenKind::Minus) {
            let start = self.start();
            self.bump();
            let expr = self.parse_unary()?;
            return Ok(ast::Negate::new(expr)
                .with_location(self.location_from(start))
                .to_expression());
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        let mut expr = self.parse_primary()?;
        while self.at(TokenKind::OpenBracket) {
            self.bump();
            let indices = self.parse_index_list()?;
            self.expect(TokenKind::CloseBracket, "`]`")?;
            expr = ast::Index::new(expr, indices)
                .with_location(self.location_from(start))
                .to_expression();
        }
        Ok(expr)
    }

    fn parse_index_list(&mut self) -> Parsed<ast::IndexList> {
        let start = self.start();
        let mut items = Vec::new();
        loop {
            let entry_start = self.start();
            let first = self.parse_expression()?;
            if self.at(TokenKind::Colon) {
                self.bump();
                let last = self.parse_expression()?;
                items.push(
                    ast::IndexRange::new(first, last)
                        .with_location(self.location_from(entry_start))
                        .to_entry(),
                );
            } else {
                items.push(
                    ast::IndexItem::new(first)
                        .with_location(self.location_from(entry_start))
                        .to_entry(),
                );
            }
            if self.at(TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(ast::IndexList::from_vec(items).with_location(self.location_from(start)))
    }

    fn parse_primary(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        match self.tokens.current() {
            TokenKind::Literal {
                kind: LiteralKind::Int,
            } => {
                let value = self.parse_int_literal()?;
                Ok(ast::IntegerLiteral::new(value)
                    .with_location(self.location_from(start))
                    .to_expression())
            }

            TokenKind::Literal {
                kind: LiteralKind::Float { empty_exponent },
            } => {
                if empty_exponent {
                    self.error_here("float literal has an empty exponent");
                    return Err(());
                }
                match self.tokens.text().parse::<f64>() {
                    Ok(value) => {
                        self.bump();
                        Ok(ast::FloatLiteral::new(value)
                            .with_location(self.location_from(start))
                            .to_expression())
                    }
                    Err(_) => {
                        self.error_here("invalid float literal");
                        Err(())
                    }
                }
            }

            TokenKind::Literal {
                kind: LiteralKind::Str { terminated },
            } => {
                if !terminated {
                    self.error_here("unterminated string literal");
                    return Err(());
                }
                let text = self.tokens.text();
                let contents = &text[1..text.len() - 1];
                match unescape_str(contents) {
                    Ok(value) => {
                        self.bump();
                        Ok(ast::StringLiteral::new(value)
                            .with_location(self.location_from(start))
                            .to_expression())
                    }
                    Err(error) => {
                        self.error_here(format!("{error} in string literal"));
                        Err(())
                    }
                }
            }

            TokenKind::Ident => {
                if self.tokens.nth(1) == TokenKind::OpenParen {
                    let name = self.expect_ident("function name")?;
                    self.bump(); // `(`
                    let arguments = self.parse_expression_list(&[TokenKind::CloseParen])?;
                    self.expect(TokenKind::CloseParen, "`)`")?;
                    Ok(ast::FunctionCall::new(name, arguments)
                        .with_location(self.location_from(start))
                        .to_expression())
                } else {
                    let identifier = self.expect_ident("identifier")?;
                    Ok(identifier.to_expression())
                }
            }

            TokenKind::OpenParen => {
                self.bump();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen, "`)`")?;
                Ok(expr)
            }

            TokenKind::OpenBracket => self.parse_matrix_literal(),

            // `{` only means JSON in expression position; in statement
            // position it opens a bundle and never reaches this function.
            TokenKind::OpenBrace => self.parse_json_literal(),

            _ => {
                self.error_here(format!("expected expression, found {}", self.found()));
                Err(())
            }
        }
    }

    // `[[a, b, ...]]` is the flat real/imaginary pair form; with `;`
    // separators either bracket form is a row-per-row matrix.
    fn parse_matrix_literal(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        self.bump(); // `[`
        if self.at(TokenKind::OpenBracket) {
            self.bump();
            let mut rows = self.parse_matrix_rows()?;
            self.expect(TokenKind::CloseBracket, "`]]`")?;
            self.expect(TokenKind::CloseBracket, "`]]`")?;
            let location = self.location_from(start);
            if rows.len() == 1 {
                let pairs = rows.remove(0);
                Ok(ast::MatrixLiteral1::new(pairs)
                    .with_location(location)
                    .to_expression())
            } else {
                Ok(ast::MatrixLiteral2::new(rows)
                    .with_location(location)
                    .to_expression())
            }
        } else {
            let rows = self.parse_matrix_rows()?;
            self.expect(TokenKind::CloseBracket, "`]`")?;
            Ok(ast::MatrixLiteral2::new(rows)
                .with_location(self.location_from(start))
                .to_expression())
        }
    }

    // Rows are `;`-separated expression lists. Newlines are allowed around
    // the separators.
    fn parse_matrix_rows(&mut self) -> Parsed<Vec<ast::ExpressionList>> {
        let mut rows = Vec::new();
        self.skip_newlines();
        loop {
            let row_start = self.start();
            let mut items = vec![self.parse_expression()?];
            while self.at(TokenKind::Comma) {
                self.bump();
                items.push(self.parse_expression()?);
            }
            rows.push(
                ast::ExpressionList::from_vec(items).with_location(self.location_from(row_start)),
            );
            self.skip_newlines();
            if self.at(TokenKind::Semi) {
                self.bump();
                self.skip_newlines();
                continue;
            }
            break;
        }
        Ok(rows)
    }

    fn parse_json_literal(&mut self) -> Parsed<ast::Expression> {
        let start = self.start();
        let src = self.tokens.src();
        match scan_json_literal(&src[start as usize..]) {
            Some(len) => {
                let text = &src[start as usize..start as usize + len];
                let value = ast::JsonLiteral::new(text);
                self.tokens.resync_to(start + len as u32);
                Ok(value
                    .with_location(self.location_from(start))
                    .to_expression())
            }
            None => {
                self.error_here("unterminated JSON literal");
                Err(())
            }
        }
    }
}
