//! A small source-to-source compiler: `def name(params) expr end` blocks in,
//! JavaScript functions out.
//!
//! - `lexer` splits source text into tokens.
//! - `parser` builds the `ast` from those tokens.
//! - `codegen` walks the tree and writes the output, pulling in definitions
//!   from `library` for any intrinsic the program calls.

pub mod ast;
pub mod codegen;
pub mod lexer;
pub mod library;
pub mod parser;

use log::debug;

use codegen::CodegenError;
use lexer::LexerError;
use parser::ParserError;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum CompileError {
    #[error(transparent)]
    Lexer(#[from] LexerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

/// Compile source text into generated code ready to print.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = lexer::lex(source)?;
    debug!("lexed {} token(s)", tokens.len());
    let ast = parser::parse(&tokens)?;
    Ok(codegen::codegen(&ast)?)
}
