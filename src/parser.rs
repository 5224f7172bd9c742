use std::fmt;

use log::debug;

use crate::ast::{Expression, Function, Program, Prototype};
use crate::lexer::{Token, TokenKind};

/// What the parser was looking for when it gave up.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Expected {
    Token(TokenKind),
    ProgramStart,
    EndOfProgram,
    NextParameter,
    NextArgument,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "a '{}' token", kind),
            Expected::ProgramStart => write!(f, "'def' keyword at start of program"),
            Expected::EndOfProgram => write!(f, "end of program"),
            Expected::NextParameter => write!(f, "next identifier in parameter list"),
            Expected::NextArgument => write!(f, "start of next expression in parameter list"),
        }
    }
}

fn describe(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("a {}", token),
        None => "nothing".to_string(),
    }
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error("Expected {expected}, but got {}.", describe(.found))]
    Unexpected {
        expected: Expected,
        found: Option<Token>,
    },
}

pub type PartialParseResult<T> = Result<T, ParserError>;

/// Recursive descent over a borrowed token slice; the slice itself is never
/// modified, only the cursor moves.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, cursor: 0 }
    }

    fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.cursor + offset)
    }

    fn next_is(&self, kind: TokenKind, offset: usize) -> bool {
        matches!(self.peek(offset), Some(token) if token.kind == kind)
    }

    fn unexpected<T>(&self, expected: Expected) -> PartialParseResult<T> {
        Err(ParserError::Unexpected {
            expected,
            found: self.peek(0).cloned(),
        })
    }

    fn consume(&mut self, kind: TokenKind) -> PartialParseResult<&'a Token> {
        match self.peek(0) {
            Some(token) if token.kind == kind => {
                self.cursor += 1;
                Ok(token)
            }
            _ => self.unexpected(Expected::Token(kind)),
        }
    }

    fn parse_identifier(&mut self) -> PartialParseResult<String> {
        Ok(self.consume(TokenKind::Identifier)?.value.clone())
    }

    fn parse_number(&mut self) -> PartialParseResult<Expression> {
        let digits = self.consume(TokenKind::Integer)?.value.trim_start_matches('0');
        let value = if digits.is_empty() { "0" } else { digits };
        Ok(Expression::Literal(value.to_string()))
    }

    fn parse_params(&mut self) -> PartialParseResult<Vec<String>> {
        let mut params = Vec::new();
        self.consume(TokenKind::OpenParen)?;

        if self.next_is(TokenKind::Identifier, 0) {
            params.push(self.parse_identifier()?);

            while self.next_is(TokenKind::Comma, 0) {
                self.consume(TokenKind::Comma)?;
                if !self.next_is(TokenKind::Identifier, 0) {
                    return self.unexpected(Expected::NextParameter);
                }
                params.push(self.parse_identifier()?);
            }
        }

        self.consume(TokenKind::CloseParen)?;
        Ok(params)
    }

    fn parse_next_arg(&mut self, args: &mut Vec<Expression>) -> PartialParseResult<()> {
        match self.parse_expr()? {
            Some(expr) => {
                args.push(expr);
                Ok(())
            }
            None => self.unexpected(Expected::NextArgument),
        }
    }

    fn parse_call(&mut self) -> PartialParseResult<Expression> {
        let callee = self.parse_identifier()?;
        let mut args = Vec::new();
        self.consume(TokenKind::OpenParen)?;

        if !self.next_is(TokenKind::CloseParen, 0) {
            self.parse_next_arg(&mut args)?;

            while self.next_is(TokenKind::Comma, 0) {
                self.consume(TokenKind::Comma)?;
                self.parse_next_arg(&mut args)?;
            }
        }

        self.consume(TokenKind::CloseParen)?;
        Ok(Expression::Call(callee, args))
    }

    /// Parses an expression if one starts here. `None` means the next token
    /// cannot begin an expression; nothing is consumed in that case.
    fn parse_expr(&mut self) -> PartialParseResult<Option<Expression>> {
        if self.next_is(TokenKind::Integer, 0) {
            self.parse_number().map(Some)
        } else if self.next_is(TokenKind::Identifier, 0) {
            if self.next_is(TokenKind::OpenParen, 1) {
                self.parse_call().map(Some)
            } else {
                Ok(Some(Expression::Variable(self.parse_identifier()?)))
            }
        } else {
            Ok(None)
        }
    }

    fn parse_def(&mut self) -> PartialParseResult<Function> {
        self.consume(TokenKind::DefKeyword)?;
        let name = self.parse_identifier()?;
        let args = self.parse_params()?;
        let body = self.parse_expr()?;
        self.consume(TokenKind::EndKeyword)?;

        Ok(Function {
            prototype: Prototype { name, args },
            body,
        })
    }

    pub fn parse_program(mut self) -> PartialParseResult<Program> {
        if self.tokens.is_empty() {
            return Ok(Program::Empty);
        }
        if !self.next_is(TokenKind::DefKeyword, 0) {
            return self.unexpected(Expected::ProgramStart);
        }

        let mut functions = Vec::new();
        while self.next_is(TokenKind::DefKeyword, 0) {
            functions.push(self.parse_def()?);
        }

        if self.peek(0).is_some() {
            return self.unexpected(Expected::EndOfProgram);
        }

        debug!("parsed {} definition(s)", functions.len());
        Ok(Program::Definitions(functions))
    }
}

pub fn parse(tokens: &[Token]) -> PartialParseResult<Program> {
    Parser::new(tokens).parse_program()
}
