//! Execution engine - grammar interpretation with backtracking.
//!
//! Each grammar scope (a rule body, a block alternative, a nested object
//! parse) runs in its own `ExecutionContext` holding a child cursor and a
//! child assembler. A scope is in progress until a primitive fails; after
//! that every remaining primitive is a no-op, so a failed scope consumes
//! no further tokens and records no further values. On success both
//! children are committed into their parents; on failure both are dropped,
//! leaving the parents exactly as they were before the scope began. That
//! pairing is the transactional backbone that makes backtracking safe.
//!
//! Construction errors are different: they mark the grammar definition as
//! inconsistent with its target type, so they propagate as faults through
//! every enclosing scope instead of being backtracked over.

use std::any::Any;

use crate::scdl::grammar::registry::TypeGrammar;
use crate::scdl::grammar::steps::{Block, CaptureKind, Slot, Step};
use crate::scdl::lexing::cursor::TokenCursor;
use crate::scdl::lexing::tokens::{Token, TokenKind};
use crate::scdl::parsing::assembling::{AssemblyError, Value, ValueAssembler};

/// Try `grammar`'s rules in registration order against independent child
/// scopes forked from the same cursor position. The first rule that both
/// matches and assembles wins; its consumption is committed into `cursor`.
/// No rule matching is `Ok(None)`; a construction error is terminal.
pub(crate) fn run_rules(
    grammar: &'static TypeGrammar,
    cursor: &mut TokenCursor<'_>,
) -> Result<Option<Box<dyn Any>>, AssemblyError> {
    for rule in grammar.rules() {
        let mut scope = ExecutionContext::new(cursor.child());
        scope.run(&rule.steps);
        if let Some(fault) = scope.fault {
            return Err(fault);
        }
        if scope.ok {
            let mut fields = scope.assembler.into_fields();
            let object = (rule.assemble)(&mut fields)?;
            cursor.commit(scope.cursor);
            return Ok(Some(object));
        }
    }
    Ok(None)
}

/// One transactional scope: child cursor, child assembler, and the scope
/// status. `ok` only ever goes from true to false; `fault` carries a
/// non-backtrackable construction error upward.
struct ExecutionContext<'t> {
    cursor: TokenCursor<'t>,
    assembler: ValueAssembler,
    ok: bool,
    fault: Option<AssemblyError>,
}

impl<'t> ExecutionContext<'t> {
    fn new(cursor: TokenCursor<'t>) -> ExecutionContext<'t> {
        ExecutionContext {
            cursor,
            assembler: ValueAssembler::new(),
            ok: true,
            fault: None,
        }
    }

    fn run(&mut self, steps: &[Step]) {
        for step in steps {
            if !self.ok {
                return;
            }
            match step {
                Step::Keyword(literal) => self.expect(|token| token.text() == *literal),
                Step::Delimiter(delimiter) => {
                    self.expect(|token| token.text().chars().eq(std::iter::once(*delimiter)))
                }
                Step::Capture { slot, kind } => self.capture(*slot, kind),
                Step::Block(block) => self.run_block(block),
            }
        }
    }

    /// Advance one token and require it to satisfy the predicate.
    fn expect(&mut self, predicate: impl FnOnce(&Token) -> bool) {
        match self.cursor.next() {
            Some(token) if predicate(token) => {}
            _ => self.ok = false,
        }
    }

    fn capture(&mut self, slot: Slot, kind: &CaptureKind) {
        match kind {
            CaptureKind::Word => match self.cursor.next() {
                Some(token) if token.kind() == TokenKind::Word => {
                    self.bind(slot, Value::Word(token.text().to_string()));
                }
                _ => self.ok = false,
            },
            CaptureKind::Number => match self.cursor.next() {
                Some(token) if token.kind() == TokenKind::Number => {
                    match token.text().parse::<i64>() {
                        Ok(number) => self.bind(slot, Value::Number(number)),
                        Err(_) => self.ok = false,
                    }
                }
                _ => self.ok = false,
            },
            CaptureKind::KeywordSet { select, .. } => match self.cursor.next() {
                Some(token) if token.kind() == TokenKind::Word => match select(token.text()) {
                    Some(value) => self.bind(slot, value),
                    None => self.ok = false,
                },
                _ => self.ok = false,
            },
            CaptureKind::Flag(literal) => {
                // A flag probes its own one-token scope; absence binds
                // false instead of failing the enclosing scope.
                let mut probe = self.cursor.child();
                let present = matches!(probe.next(), Some(token) if token.text() == *literal);
                if present {
                    self.cursor.commit(probe);
                }
                self.bind(slot, Value::Flag(present));
            }
            CaptureKind::Nested(resolve) => {
                let grammar = resolve();
                match run_rules(grammar, &mut self.cursor) {
                    Ok(Some(object)) => self.bind(
                        slot,
                        Value::Object {
                            type_name: grammar.name(),
                            value: object,
                        },
                    ),
                    Ok(None) => self.ok = false,
                    Err(fault) => {
                        self.fault = Some(fault);
                        self.ok = false;
                    }
                }
            }
        }
    }

    fn bind(&mut self, slot: Slot, value: Value) {
        match slot {
            Slot::Scalar(field) => self.assembler.set(field, value),
            Slot::List(field) => self.assembler.append(field, value),
        }
    }

    /// Run one alternative in a fresh child scope; commit both halves on
    /// success. A construction fault poisons this scope and reports the
    /// attempt as failed.
    fn attempt(&mut self, steps: &[Step]) -> bool {
        let mut child = ExecutionContext {
            cursor: self.cursor.child(),
            assembler: self.assembler.child(),
            ok: true,
            fault: None,
        };
        child.run(steps);
        if let Some(fault) = child.fault {
            self.fault = Some(fault);
            self.ok = false;
            return false;
        }
        if child.ok {
            self.cursor.commit(child.cursor);
            self.assembler.commit(child.assembler);
            true
        } else {
            false
        }
    }

    /// The quantified-block loop. Every pass retries the alternatives
    /// from the first, so a grammar with same-prefix alternatives is
    /// biased toward the earliest registered one on every single match.
    /// Each success commits immediately, making its consumption and
    /// recordings visible to the attempts that follow it.
    fn run_block(&mut self, block: &Block) {
        let mut count = 0;
        'matching: while count < block.repeat.max() {
            let before = self.cursor.position();
            for alternative in &block.alternatives {
                if self.attempt(alternative) {
                    count += 1;
                    if self.cursor.position() == before {
                        // A zero-width success would repeat forever;
                        // count it once and stop iterating.
                        break 'matching;
                    }
                    continue 'matching;
                }
                if self.fault.is_some() {
                    return;
                }
            }
            break;
        }
        self.ok = self.ok && block.repeat.admits(count);
    }
}
