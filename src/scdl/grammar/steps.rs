//! Step vocabulary for grammar descriptions.
//!
//! A description is a flat sequence of steps; nesting comes from blocks
//! (quantified groups of alternative sequences) and from nested-object
//! captures that delegate to another type's registered grammar.

use crate::scdl::grammar::registry::TypeGrammar;
use crate::scdl::parsing::assembling::Value;

/// Where a captured value lands: overwrite a named scalar field, or append
/// to a named list field. The engine treats both as opaque instructions to
/// the value assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Scalar(&'static str),
    List(&'static str),
}

impl Slot {
    /// Bind to a scalar field; a later capture for the same field wins.
    pub fn field(name: &'static str) -> Slot {
        Slot::Scalar(name)
    }

    /// Append to an ordered list field.
    pub fn list(name: &'static str) -> Slot {
        Slot::List(name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Slot::Scalar(name) | Slot::List(name) => name,
        }
    }
}

/// Repetition class of a block: `{0,1}`, `{0,inf}` or `{1,inf}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Repeat {
    pub fn min(self) -> usize {
        match self {
            Repeat::OneOrMore => 1,
            _ => 0,
        }
    }

    pub fn max(self) -> usize {
        match self {
            Repeat::Optional => 1,
            _ => usize::MAX,
        }
    }

    pub fn admits(self, count: usize) -> bool {
        count >= self.min() && count <= self.max()
    }
}

/// Deferred reference to another type's grammar. Resolution happens at
/// execution and harvesting time, never while a description is being
/// built; this is what keeps self-referential grammars well-founded.
pub type GrammarRef = fn() -> &'static TypeGrammar;

/// What a capture step recognizes and how it turns the match into a value.
pub enum CaptureKind {
    /// A word-shaped token, bound as its text.
    Word,
    /// A number-shaped token, bound as an integer. A fractional literal
    /// fails the capture as an ordinary mismatch.
    Number,
    /// A word whose text is one of an enumerated keyword set; binds the
    /// matched variant. `literals` exists for harvesting, `select` for
    /// matching.
    KeywordSet {
        literals: fn() -> Vec<&'static str>,
        select: fn(&str) -> Option<Value>,
    },
    /// An optional lone keyword: binds `true` when present and `false`
    /// when absent, never failing the enclosing scope.
    Flag(&'static str),
    /// A nested object parsed by the referenced grammar on the shared
    /// cursor; failure of every alternative fails the enclosing scope.
    Nested(GrammarRef),
}

/// One primitive of a grammar description.
pub enum Step {
    /// Match one token whose text equals the literal.
    Keyword(&'static str),
    /// Match one token whose text is exactly this character.
    Delimiter(char),
    /// Match and bind a value into the assembler.
    Capture { slot: Slot, kind: CaptureKind },
    /// A quantified group of alternative sequences.
    Block(Block),
}

/// A quantified group. Alternatives keep their registration order; the
/// engine retries them from the first on every pass, which biases
/// same-prefix alternatives toward the earliest registered one.
pub struct Block {
    pub repeat: Repeat,
    pub alternatives: Vec<Vec<Step>>,
}
