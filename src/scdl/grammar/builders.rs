//! Builders for grammar descriptions.
//!
//! The authoring surface: chainable step construction closed by
//! `.assemble(..)`, which pairs the step sequence with the construction
//! function for its result type. Blocks take closures so nested sequences
//! read in grammar order:
//!
//!     TypeGrammar::define("Event").rule(
//!         RuleBuilder::new()
//!             .keyword_of::<EventDirection>(Slot::field("direction"))
//!             .keyword("event")
//!             .word(Slot::field("name"))
//!             .optional(|typed| typed.delimiter(':').keyword_of::<ScType>(Slot::field("ty")))
//!             .assemble(|fields| { .. }),
//!     )

use std::any::Any;

use crate::scdl::grammar::registry::{Keywords, Parseable, Rule};
use crate::scdl::grammar::steps::{Block, CaptureKind, Repeat, Slot, Step};
use crate::scdl::parsing::assembling::{AssemblyError, FieldSet, Value};

fn keyword_literals<E: Keywords>() -> Vec<&'static str> {
    E::ALL.iter().map(|value| value.keyword()).collect()
}

fn select_keyword<E: Keywords>(text: &str) -> Option<Value> {
    E::from_keyword(text).map(Value::object)
}

/// Builds one step sequence; also used for the alternative sequences
/// inside blocks.
#[derive(Default)]
pub struct RuleBuilder {
    steps: Vec<Step>,
}

impl RuleBuilder {
    pub fn new() -> RuleBuilder {
        RuleBuilder::default()
    }

    pub fn keyword(mut self, literal: &'static str) -> RuleBuilder {
        self.steps.push(Step::Keyword(literal));
        self
    }

    pub fn delimiter(mut self, delimiter: char) -> RuleBuilder {
        self.steps.push(Step::Delimiter(delimiter));
        self
    }

    /// Capture a word token into the slot.
    pub fn word(mut self, slot: Slot) -> RuleBuilder {
        self.steps.push(Step::Capture {
            slot,
            kind: CaptureKind::Word,
        });
        self
    }

    /// Capture a number token, converted to an integer, into the slot.
    pub fn number(mut self, slot: Slot) -> RuleBuilder {
        self.steps.push(Step::Capture {
            slot,
            kind: CaptureKind::Number,
        });
        self
    }

    /// Capture one keyword out of an enumerated set, binding the matched
    /// variant.
    pub fn keyword_of<E: Keywords>(mut self, slot: Slot) -> RuleBuilder {
        self.steps.push(Step::Capture {
            slot,
            kind: CaptureKind::KeywordSet {
                literals: keyword_literals::<E>,
                select: select_keyword::<E>,
            },
        });
        self
    }

    /// Capture the presence of a lone keyword as a boolean.
    pub fn flag(mut self, slot: Slot, literal: &'static str) -> RuleBuilder {
        self.steps.push(Step::Capture {
            slot,
            kind: CaptureKind::Flag(literal),
        });
        self
    }

    /// Capture a nested object parsed by `V`'s registered grammar.
    pub fn nested<V: Parseable>(mut self, slot: Slot) -> RuleBuilder {
        self.steps.push(Step::Capture {
            slot,
            kind: CaptureKind::Nested(V::grammar),
        });
        self
    }

    /// A `{0,1}` block with a single alternative.
    pub fn optional(self, build: impl FnOnce(RuleBuilder) -> RuleBuilder) -> RuleBuilder {
        self.block(Repeat::Optional, |block| block.or(build))
    }

    /// A `{0,inf}` block with a single alternative.
    pub fn zero_or_more(self, build: impl FnOnce(RuleBuilder) -> RuleBuilder) -> RuleBuilder {
        self.block(Repeat::ZeroOrMore, |block| block.or(build))
    }

    /// A `{1,inf}` block with a single alternative.
    pub fn one_or_more(self, build: impl FnOnce(RuleBuilder) -> RuleBuilder) -> RuleBuilder {
        self.block(Repeat::OneOrMore, |block| block.or(build))
    }

    /// A quantified block with explicitly registered alternatives.
    pub fn block(
        mut self,
        repeat: Repeat,
        build: impl FnOnce(BlockBuilder) -> BlockBuilder,
    ) -> RuleBuilder {
        let builder = build(BlockBuilder {
            alternatives: Vec::new(),
        });
        self.steps.push(Step::Block(Block {
            repeat,
            alternatives: builder.alternatives,
        }));
        self
    }

    /// Close the description with its construction function.
    pub fn assemble<T: Any>(
        self,
        assemble: fn(&mut FieldSet) -> Result<T, AssemblyError>,
    ) -> Rule {
        Rule {
            steps: self.steps,
            assemble: Box::new(move |fields| {
                assemble(fields).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        }
    }
}

/// Registers the alternatives of a block, in order.
pub struct BlockBuilder {
    alternatives: Vec<Vec<Step>>,
}

impl BlockBuilder {
    pub fn or(mut self, build: impl FnOnce(RuleBuilder) -> RuleBuilder) -> BlockBuilder {
        self.alternatives.push(build(RuleBuilder::new()).steps);
        self
    }
}
