//! Harvesting - static literal collection for tokenizer configuration.
//!
//! Before a grammar's first real parse, a dry traversal walks its step
//! sequences without consuming tokens or building values and records every
//! keyword literal and delimiter character it can ever reference,
//! including through nested and recursive object captures. Both sides of
//! every quantifier and alternation branch are visited; a visited set
//! keyed by grammar identity keeps self-referential and mutually
//! recursive grammars from being walked more than once.
//!
//! The delimiter half of the result becomes the tokenizer's fixed
//! alphabet for that grammar.

use std::collections::{BTreeSet, HashSet};

use crate::scdl::grammar::registry::TypeGrammar;
use crate::scdl::grammar::steps::{CaptureKind, Step};

/// The deduplicated literal sets statically reachable from one grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolDetails {
    keywords: BTreeSet<&'static str>,
    delimiters: BTreeSet<char>,
}

impl ProtocolDetails {
    pub fn keywords(&self) -> &BTreeSet<&'static str> {
        &self.keywords
    }

    pub fn delimiters(&self) -> &BTreeSet<char> {
        &self.delimiters
    }
}

/// Collect every literal reachable from `grammar`.
pub fn harvest(grammar: &'static TypeGrammar) -> ProtocolDetails {
    let mut details = ProtocolDetails::default();
    let mut visited = HashSet::new();
    walk_grammar(grammar, &mut details, &mut visited);
    details
}

fn walk_grammar(
    grammar: &'static TypeGrammar,
    details: &mut ProtocolDetails,
    visited: &mut HashSet<usize>,
) {
    if !visited.insert(grammar as *const TypeGrammar as usize) {
        return;
    }
    for rule in grammar.rules() {
        walk_steps(&rule.steps, details, visited);
    }
}

fn walk_steps(steps: &[Step], details: &mut ProtocolDetails, visited: &mut HashSet<usize>) {
    for step in steps {
        match step {
            Step::Keyword(literal) => {
                details.keywords.insert(literal);
            }
            Step::Delimiter(delimiter) => {
                details.delimiters.insert(*delimiter);
            }
            Step::Capture { kind, .. } => match kind {
                CaptureKind::Flag(literal) => {
                    details.keywords.insert(literal);
                }
                CaptureKind::KeywordSet { literals, .. } => {
                    for literal in literals() {
                        details.keywords.insert(literal);
                    }
                }
                CaptureKind::Nested(resolve) => walk_grammar(resolve(), details, visited),
                CaptureKind::Word | CaptureKind::Number => {}
            },
            Step::Block(block) => {
                for alternative in &block.alternatives {
                    walk_steps(alternative, details, visited);
                }
            }
        }
    }
}
