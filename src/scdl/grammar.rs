//! Grammar descriptions
//!
//! Grammars in scdl are data, not code: a parseable type describes itself
//! as an ordered sequence of steps, and the execution engine interprets
//! that description against a token stream. This module holds:
//! 1. The step vocabulary itself (`steps`)
//! 2. The builder surface grammar authors use to write descriptions
//!    (`builders`)
//! 3. The registry tying result types to their descriptions, including
//!    ordered alternatives for sum types and deferred references that make
//!    recursive grammars well-founded (`registry`)
//! 4. Harvesting, the non-consuming traversal that collects every keyword
//!    and delimiter a grammar can reference so the tokenizer can be
//!    configured for exactly that alphabet (`harvesting`)

pub mod builders;
pub mod harvesting;
pub mod registry;
pub mod steps;

pub use builders::{BlockBuilder, RuleBuilder};
pub use harvesting::{harvest, ProtocolDetails};
pub use registry::{Keywords, Parseable, Protocol, Rule, TypeGrammar};
pub use steps::{Block, CaptureKind, GrammarRef, Repeat, Slot, Step};
