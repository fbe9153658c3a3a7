//! Tokenizer - Combined-Pattern Lexer for scdl
//!
//! This module splits raw text into a flat token array:
//! 1. One regex alternation covers every lexical category; categories are
//!    tried in declaration order for each match, so a comment swallows the
//!    rest of its line before anything inside it is considered, and a
//!    string literal is matched whole even when its content could start a
//!    comment
//! 2. The scan is greedy left to right over the whole input; any span not
//!    covered by a match (including a trailing one) is a lexical error,
//!    never silently skipped
//! 3. Comments and whitespace participate in covering the input but are
//!    dropped from the output array
//!
//! The delimiter category is not fixed: each grammar declares the single
//! characters it needs (collected by harvesting) and gets a tokenizer built
//! for exactly that alphabet. Characters no grammar asked for stay
//! unclassifiable.

use std::collections::BTreeSet;
use std::fmt;

use regex::Regex;

use crate::scdl::lexing::tokens::{Token, TokenKind};

/// Errors that can occur during tokenization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A contiguous span of input matched no category and no declared
    /// delimiter. Carries the offending substring.
    UnexpectedSymbols(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedSymbols(span) => write!(f, "unexpected symbols '{}'", span),
        }
    }
}

impl std::error::Error for LexError {}

const COMMENT: &str = r"//[^\n]*";
const SPACES: &str = r"[ \t\r\n]+";
const STRING_LITERAL: &str = r#""[^"]*""#;
const WORD: &str = r"[A-Za-z_][A-Za-z0-9_]*";
// `0` or a non-zero-leading digit run, optional fraction. No sign and no
// exponent; grammars wanting negatives compose a `-` delimiter token.
const NUMBER: &str = r"(?:0|[1-9][0-9]*)(?:\.[0-9]*)?";

/// Splits text into tokens for one grammar's delimiter alphabet.
///
/// The combined pattern is compiled once per grammar and reused across
/// parse calls; see the harvesting module for how the alphabet is obtained.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new(delimiters: &BTreeSet<char>) -> Tokenizer {
        let mut pattern = format!(
            "(?P<comment>{COMMENT})|(?P<spaces>{SPACES})|(?P<string>{STRING_LITERAL})|(?P<word>{WORD})|(?P<number>{NUMBER})"
        );
        if !delimiters.is_empty() {
            let class: String = delimiters
                .iter()
                .map(|delimiter| regex::escape(&delimiter.to_string()))
                .collect();
            pattern.push_str(&format!("|(?P<delimiter>[{class}])"));
        }
        // Fixed fragments plus escaped single characters; always a valid pattern.
        Tokenizer {
            pattern: Regex::new(&pattern).unwrap(),
        }
    }

    /// Tokenize `input`, discarding comments and whitespace.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut previous_end = 0;
        for captures in self.pattern.captures_iter(input) {
            let matched = captures.get(0).unwrap();
            if previous_end < matched.start() {
                return Err(LexError::UnexpectedSymbols(
                    input[previous_end..matched.start()].to_string(),
                ));
            }
            previous_end = matched.end();
            let kind = if captures.name("comment").is_some() || captures.name("spaces").is_some() {
                continue;
            } else if captures.name("string").is_some() {
                TokenKind::StringLiteral
            } else if captures.name("word").is_some() {
                TokenKind::Word
            } else if captures.name("number").is_some() {
                TokenKind::Number
            } else {
                TokenKind::Delimiter
            };
            tokens.push(Token::new(matched.as_str(), kind));
        }
        if previous_end < input.len() {
            return Err(LexError::UnexpectedSymbols(input[previous_end..].to_string()));
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delimiters(characters: &[char]) -> BTreeSet<char> {
        characters.iter().copied().collect()
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn classifies_words_and_numbers() {
        let tokenizer = Tokenizer::new(&delimiters(&[]));
        let tokens = tokenizer.tokenize("abc _x1 0 42 3.14").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word,
                TokenKind::Word,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn zero_does_not_lead_a_longer_number() {
        let tokenizer = Tokenizer::new(&delimiters(&[]));
        let tokens = tokenizer.tokenize("05").unwrap();
        assert_eq!(texts(&tokens), vec!["0", "5"]);
    }

    #[test]
    fn sign_is_not_part_of_a_number() {
        let tokenizer = Tokenizer::new(&delimiters(&['-']));
        let tokens = tokenizer.tokenize("-5").unwrap();
        assert_eq!(texts(&tokens), vec!["-", "5"]);
        assert_eq!(tokens[0].kind(), TokenKind::Delimiter);
        assert_eq!(tokens[1].kind(), TokenKind::Number);
    }

    #[test]
    fn trailing_unclassifiable_span_is_reported() {
        let tokenizer = Tokenizer::new(&delimiters(&[]));
        let error = tokenizer.tokenize("aaa bbb #").unwrap_err();
        assert_eq!(error, LexError::UnexpectedSymbols("#".to_string()));
    }

    #[test]
    fn comment_swallows_a_following_string_literal() {
        let tokenizer = Tokenizer::new(&delimiters(&['=']));
        let tokens = tokenizer.tokenize("aaa = //\"bbb\"").unwrap();
        assert_eq!(texts(&tokens), vec!["aaa", "="]);
    }
}
