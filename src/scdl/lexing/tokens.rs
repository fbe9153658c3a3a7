//! Token types produced by the tokenizer.

use serde::{Deserialize, Serialize};

/// Lexical category of a token. Every token has exactly one.
///
/// Comments and whitespace are recognized during tokenization but never
/// surface as tokens, so they have no category here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Number,
    StringLiteral,
    Delimiter,
}

/// A classified slice of the source text.
///
/// Tokens carry no position metadata; lexical errors report the offending
/// source substring instead of line/column coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Token {
        Token {
            text: text.into(),
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}
