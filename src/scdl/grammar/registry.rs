//! Grammar registry
//!
//! Ties result types to their grammar descriptions. A product type
//! registers exactly one rule; a sum type registers several, tried in
//! declaration order. Each grammar lazily computes and caches its
//! protocol (harvested literals plus the tokenizer built from them) on
//! first parse; the cached protocol is read-only afterwards and shared by
//! every later parse call.

use std::any::Any;

use once_cell::sync::OnceCell;

use crate::scdl::grammar::harvesting::{harvest, ProtocolDetails};
use crate::scdl::grammar::steps::Step;
use crate::scdl::lexing::tokenizer::Tokenizer;
use crate::scdl::parsing::assembling::{AssemblyError, FieldSet};

/// Construction function of a rule: turns the assembled field set into a
/// boxed result value, or reports a construction inconsistency.
pub type AssembleFn =
    Box<dyn Fn(&mut FieldSet) -> Result<Box<dyn Any>, AssemblyError> + Send + Sync>;

/// One grammar description: a step sequence plus the statically registered
/// construction function that builds the result from captured fields.
pub struct Rule {
    pub steps: Vec<Step>,
    pub assemble: AssembleFn,
}

/// Everything a grammar needs before tokens can flow: the harvested
/// literal sets and the tokenizer compiled for the delimiter alphabet.
pub struct Protocol {
    details: ProtocolDetails,
    tokenizer: Tokenizer,
}

impl Protocol {
    pub fn details(&self) -> &ProtocolDetails {
        &self.details
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

/// The registered grammar of one parseable type.
pub struct TypeGrammar {
    name: &'static str,
    rules: Vec<Rule>,
    protocol: OnceCell<Protocol>,
}

impl TypeGrammar {
    pub fn define(name: &'static str) -> TypeGrammar {
        TypeGrammar {
            name,
            rules: Vec::new(),
            protocol: OnceCell::new(),
        }
    }

    /// Register an alternative. Order matters: alternatives are attempted
    /// in registration order wherever this grammar is consulted.
    pub fn rule(mut self, rule: Rule) -> TypeGrammar {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The harvested protocol, computed on first use and cached for the
    /// grammar's lifetime.
    pub fn protocol(&'static self) -> &'static Protocol {
        self.protocol.get_or_init(|| {
            let details = harvest(self);
            let tokenizer = Tokenizer::new(details.delimiters());
            Protocol { details, tokenizer }
        })
    }
}

/// A type the engine can parse: exposes its registered grammar.
///
/// Implementations hand out a `Lazy` static; recursive and mutually
/// recursive grammars work because nested captures store this function
/// itself rather than its result.
pub trait Parseable: Any + Sized {
    fn grammar() -> &'static TypeGrammar;
}

/// An enumerated keyword set, used by enum captures: every variant names
/// the literal token text it matches.
pub trait Keywords: Any + Copy + Send + Sync {
    const ALL: &'static [Self];

    fn keyword(self) -> &'static str;

    fn from_keyword(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|value| value.keyword() == text)
    }
}
