//! Pratt parser producing a [`Program`] from a token vector.

use std::rc::Rc;

use monkey_syntax::ast::*;
use monkey_syntax::error::{error_at, Result};
use monkey_syntax::token::{Token, TokenKind};
use tracing::debug;

/// Binding power of operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

fn infix_operator(kind: &TokenKind) -> Option<InfixOperator> {
    let op = match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        _ => return None,
    };
    Some(op)
}

/// Recursive-descent parser with Pratt-style expression parsing.
///
/// The token vector must end with [`TokenKind::Eof`], as produced by the lexer.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let (line, col) = tokens.last().map(|t| (t.line, t.col)).unwrap_or((1, 1));
            tokens.push(Token { kind: TokenKind::Eof, line, col });
        }
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        // Eof is never consumed, so pos stays in bounds
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current_kind() == kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.at(&kind) {
            Ok(self.advance())
        } else {
            let got = self.current();
            error_at(
                got.line,
                got.col,
                format!("expected next token to be {}, got {}", kind, got.kind),
            )
        }
    }

    fn expect_ident(&mut self) -> Result<String> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => {
                let got = self.current();
                error_at(
                    got.line,
                    got.col,
                    format!("expected next token to be identifier, got {}", other),
                )
            }
        }
    }

    fn skip_semicolon(&mut self) {
        if self.at(&TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Parses the whole token stream.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        loop {
            while self.at(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.at(&TokenKind::Eof) {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let stmt = match self.current_kind() {
            TokenKind::Let => {
                self.advance();
                let name = self.expect_ident()?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expression_with(Precedence::Lowest)?;
                Statement::Let { name, value }
            }
            TokenKind::Return => {
                self.advance();
                Statement::Return(self.parse_expression_with(Precedence::Lowest)?)
            }
            _ => Statement::Expression(self.parse_expression_with(Precedence::Lowest)?),
        };
        self.skip_semicolon();
        Ok(stmt)
    }

    fn parse_block(&mut self) -> Result<BlockStatement> {
        self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        loop {
            while self.at(&TokenKind::Semicolon) {
                self.advance();
            }
            if self.at(&TokenKind::RBrace) || self.at(&TokenKind::Eof) {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(BlockStatement { statements })
    }

    /// Parses a single expression at the lowest precedence.
    pub fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_expression_with(Precedence::Lowest)
    }

    fn parse_expression_with(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix()?;
        while !self.at(&TokenKind::Semicolon) && precedence < precedence_of(self.current_kind()) {
            left = if self.at(&TokenKind::LParen) {
                self.advance();
                let arguments = self.parse_call_arguments()?;
                Expression::Call { function: Box::new(left), arguments }
            } else {
                let tok = self.advance();
                let prec = precedence_of(&tok.kind);
                let Some(operator) = infix_operator(&tok.kind) else {
                    return error_at(tok.line, tok.col, format!("no infix parse function for {} found", tok.kind));
                };
                let right = self.parse_expression_with(prec)?;
                Expression::Infix { left: Box::new(left), operator, right: Box::new(right) }
            };
        }
        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expression> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Ident(name) => Ok(Expression::Identifier(name)),
            TokenKind::Int(n) => Ok(Expression::IntegerLiteral(n)),
            TokenKind::String(s) => Ok(Expression::StringLiteral(s)),
            TokenKind::True => Ok(Expression::BooleanLiteral(true)),
            TokenKind::False => Ok(Expression::BooleanLiteral(false)),
            TokenKind::Bang | TokenKind::Minus => {
                let operator = if tok.kind == TokenKind::Bang {
                    PrefixOperator::Bang
                } else {
                    PrefixOperator::Minus
                };
                let right = self.parse_expression_with(Precedence::Prefix)?;
                Ok(Expression::Prefix { operator, right: Box::new(right) })
            }
            TokenKind::LParen => {
                let inner = self.parse_expression_with(Precedence::Lowest)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::If => self.parse_if(),
            TokenKind::Function => self.parse_function_literal(),
            other => error_at(tok.line, tok.col, format!("no prefix parse function for {} found", other)),
        }
    }

    fn parse_if(&mut self) -> Result<Expression> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression_with(Precedence::Lowest)?;
        self.expect(TokenKind::RParen)?;
        let consequence = self.parse_block()?;
        let alternative = if self.at(&TokenKind::Else) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Expression::If { condition: Box::new(condition), consequence, alternative })
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect(TokenKind::LParen)?;
        let mut parameters = Vec::new();
        if !self.at(&TokenKind::RParen) {
            parameters.push(self.expect_ident()?);
            while self.at(&TokenKind::Comma) {
                self.advance();
                parameters.push(self.expect_ident()?);
            }
        }
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(Expression::Function(FunctionLiteral { parameters, body: Rc::new(body) }))
    }

    // Called with the opening paren already consumed.
    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.at(&TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        args.push(self.parse_expression_with(Precedence::Lowest)?);
        while self.at(&TokenKind::Comma) {
            self.advance();
            args.push(self.parse_expression_with(Precedence::Lowest)?);
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}
