//! Parsing
//!
//! The execution half of the engine:
//! 1. `assembling` holds the transactional value assembler that mirrors the
//!    token cursor's child/commit model, and the field set handed to
//!    construction functions
//! 2. `engine` interprets grammar descriptions against a cursor/assembler
//!    pair, with backtracking, quantifiers and ordered alternation
//! 3. This module exposes the entry point, `parse`, and the error type
//!    separating the three failure classes: lexical failure, grammar
//!    mismatch and construction inconsistency

pub mod assembling;
mod engine;

use std::fmt;

use crate::scdl::grammar::registry::Parseable;
use crate::scdl::lexing::cursor::TokenCursor;
use crate::scdl::lexing::tokenizer::LexError;

pub use assembling::{AssemblyError, FieldSet, Value, ValueAssembler};

/// Errors that can occur during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input could not be tokenized; no grammar execution was
    /// attempted.
    Lex(LexError),
    /// No rule of the target grammar matched. This is the ordinary
    /// "absence of a result" outcome, not a fault in the grammar.
    Mismatch,
    /// The grammar matched but its construction function could not build
    /// the result. This points at a grammar definition that is
    /// inconsistent with its target type, not at the input.
    Assembly(AssemblyError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(error) => write!(f, "{}", error),
            ParseError::Mismatch => write!(f, "no grammar rule matched the input"),
            ParseError::Assembly(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> ParseError {
        ParseError::Lex(error)
    }
}

impl From<AssemblyError> for ParseError {
    fn from(error: AssemblyError) -> ParseError {
        ParseError::Assembly(error)
    }
}

/// Parse `input` as a `T`.
///
/// Tokenizes with the tokenizer cached for `T`'s grammar, then tries the
/// grammar's rules in registration order. Tokens beyond the recognized
/// prefix are left unconsumed.
pub fn parse<T: Parseable>(input: &str) -> Result<T, ParseError> {
    let grammar = T::grammar();
    let tokens = grammar.protocol().tokenizer().tokenize(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    match engine::run_rules(grammar, &mut cursor)? {
        Some(object) => object.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            ParseError::Assembly(AssemblyError::ResultType {
                expected: std::any::type_name::<T>(),
                grammar: grammar.name(),
            })
        }),
        None => Err(ParseError::Mismatch),
    }
}
