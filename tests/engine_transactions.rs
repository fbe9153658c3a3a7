//! Engine-level tests with purpose-built grammars.
//!
//! These pin down the transactional semantics: failed scopes leave their
//! parents untouched, quantifier ranges gate the enclosing scope, ordered
//! alternation is biased toward the first registered alternative, and
//! construction errors are not backtracked over.

use once_cell::sync::Lazy;

use scdl::scdl::grammar::{Parseable, Repeat, RuleBuilder, Slot, TypeGrammar};
use scdl::scdl::parsing::{parse, AssemblyError, ParseError};

/// `begin [<word> end] <word>` - the optional block consumes a word and
/// then demands `end`, so on plain input it fails after consuming.
#[derive(Debug, Clone, PartialEq)]
struct Probed {
    probed: Option<String>,
    tail: String,
}

impl Parseable for Probed {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Probed").rule(
                RuleBuilder::new()
                    .keyword("begin")
                    .optional(|attempt| attempt.word(Slot::field("probed")).keyword("end"))
                    .word(Slot::field("tail"))
                    .assemble(|fields| {
                        Ok(Probed {
                            probed: fields.word_opt("probed")?,
                            tail: fields.word("tail")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[test]
fn a_failed_scope_restores_cursor_and_recorded_values() {
    // The optional attempt consumes "tail" and records it before failing;
    // both effects must be rolled back for the enclosing rule to see them.
    let probed: Probed = parse("begin tail").unwrap();
    assert_eq!(probed.probed, None);
    assert_eq!(probed.tail, "tail");
}

#[test]
fn a_successful_scope_commits_cursor_and_recorded_values() {
    let probed: Probed = parse("begin middle end tail").unwrap();
    assert_eq!(probed.probed, Some("middle".to_string()));
    assert_eq!(probed.tail, "tail");
}

#[derive(Debug, Clone, PartialEq)]
struct AtLeastOne {
    items: Vec<String>,
}

impl Parseable for AtLeastOne {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("AtLeastOne").rule(
                RuleBuilder::new()
                    .keyword("plus")
                    .one_or_more(|item| item.word(Slot::list("items")))
                    .assemble(|fields| {
                        Ok(AtLeastOne {
                            items: fields.words("items")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[derive(Debug, Clone, PartialEq)]
struct AnyNumber {
    items: Vec<String>,
}

impl Parseable for AnyNumber {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("AnyNumber").rule(
                RuleBuilder::new()
                    .keyword("star")
                    .zero_or_more(|item| item.word(Slot::list("items")))
                    .assemble(|fields| {
                        Ok(AnyNumber {
                            items: fields.words("items")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[test]
fn one_or_more_fails_the_scope_on_zero_matches() {
    assert_eq!(parse::<AtLeastOne>("plus").unwrap_err(), ParseError::Mismatch);

    let matched: AtLeastOne = parse("plus aaa bbb").unwrap();
    assert_eq!(matched.items, vec!["aaa", "bbb"]);
}

#[test]
fn zero_or_more_never_fails_the_scope() {
    let empty: AnyNumber = parse("star").unwrap();
    assert!(empty.items.is_empty());

    let matched: AnyNumber = parse("star aaa bbb ccc").unwrap();
    assert_eq!(matched.items, vec!["aaa", "bbb", "ccc"]);
}

/// Two rules sharing the prefix `x`; the longer one is registered second
/// and can therefore never win on input both could match.
#[derive(Debug, Clone, PartialEq)]
enum Choice {
    Short,
    Long,
}

impl Parseable for Choice {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Choice")
                .rule(RuleBuilder::new().keyword("x").assemble(|_| Ok(Choice::Short)))
                .rule(
                    RuleBuilder::new()
                        .keyword("x")
                        .keyword("y")
                        .assemble(|_| Ok(Choice::Long)),
                )
        });
        &GRAMMAR
    }
}

#[test]
fn alternation_prefers_the_first_registered_rule_over_a_longer_match() {
    assert_eq!(parse::<Choice>("x y").unwrap(), Choice::Short);
}

/// A block whose two alternatives both match a bare word; everything must
/// land in the first alternative's list.
#[derive(Debug, Clone, PartialEq)]
struct Biased {
    first: Vec<String>,
    second: Vec<String>,
}

impl Parseable for Biased {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Biased").rule(
                RuleBuilder::new()
                    .keyword("pick")
                    .block(Repeat::ZeroOrMore, |alternatives| {
                        alternatives
                            .or(|word| word.word(Slot::list("first")))
                            .or(|word| word.word(Slot::list("second")))
                    })
                    .assemble(|fields| {
                        Ok(Biased {
                            first: fields.words("first")?,
                            second: fields.words("second")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[test]
fn every_block_pass_retries_alternatives_from_the_first() {
    let biased: Biased = parse("pick aaa bbb ccc").unwrap();
    assert_eq!(biased.first, vec!["aaa", "bbb", "ccc"]);
    assert!(biased.second.is_empty());
}

/// A repetition over a flag alone: the flag matches zero tokens when the
/// keyword is absent, which must not spin the block forever.
#[derive(Debug, Clone, PartialEq)]
struct Flagged {
    seen: bool,
}

impl Parseable for Flagged {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Flagged").rule(
                RuleBuilder::new()
                    .keyword("go")
                    .zero_or_more(|flag| flag.flag(Slot::field("seen"), "maybe"))
                    .assemble(|fields| {
                        Ok(Flagged {
                            seen: fields.flag("seen")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[test]
fn a_zero_width_alternative_terminates_the_block() {
    let flagged: Flagged = parse("go").unwrap();
    assert!(!flagged.seen);
}

/// Matches fine but asks for a field no step ever captures.
#[derive(Debug, Clone, PartialEq)]
struct Inconsistent {
    value: String,
}

impl Parseable for Inconsistent {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Inconsistent").rule(RuleBuilder::new().keyword("ok").assemble(
                |fields| {
                    Ok(Inconsistent {
                        value: fields.word("missing")?,
                    })
                },
            ))
        });
        &GRAMMAR
    }
}

#[test]
fn construction_inconsistency_is_distinct_from_a_mismatch() {
    assert_eq!(
        parse::<Inconsistent>("ok").unwrap_err(),
        ParseError::Assembly(AssemblyError::MissingField("missing"))
    );
    assert_eq!(parse::<Inconsistent>("nope").unwrap_err(), ParseError::Mismatch);
}

/// Wraps the inconsistent grammar inside an optional block: the fault must
/// surface instead of being backtracked into a clean `None`.
#[derive(Debug, Clone, PartialEq)]
struct Wrapper {
    inner: Option<Inconsistent>,
}

impl Parseable for Wrapper {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Wrapper").rule(
                RuleBuilder::new()
                    .keyword("wrap")
                    .optional(|inner| inner.nested::<Inconsistent>(Slot::field("inner")))
                    .assemble(|fields| {
                        Ok(Wrapper {
                            inner: fields.object_opt("inner")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

#[test]
fn construction_errors_are_not_backtracked_over() {
    assert_eq!(
        parse::<Wrapper>("wrap ok").unwrap_err(),
        ParseError::Assembly(AssemblyError::MissingField("missing"))
    );
}
