//! Interface declarations: events, variables, operations.
//!
//! Grammar shapes, one line each:
//!
//!     in event pressed : boolean
//!     var readonly clicks : integer
//!     operation reset(aaa : integer, bbb : boolean) : string
//!     interface Buttons { ..members in any order.. }

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::scdl::grammar::{Parseable, Repeat, RuleBuilder, Slot, TypeGrammar};
use crate::scdl::model::types::{EventDirection, ScType};

/// A named event with a direction and an optional payload type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub direction: EventDirection,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<ScType>,
}

impl Parseable for Event {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Event").rule(
                RuleBuilder::new()
                    .keyword_of::<EventDirection>(Slot::field("direction"))
                    .keyword("event")
                    .word(Slot::field("name"))
                    .optional(|typed| typed.delimiter(':').keyword_of::<ScType>(Slot::field("ty")))
                    .assemble(|fields| {
                        Ok(Event {
                            direction: fields.object("direction")?,
                            name: fields.word("name")?,
                            ty: fields.object_opt("ty")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// One typed operation argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ScType,
}

impl Parseable for Argument {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Argument").rule(
                RuleBuilder::new()
                    .word(Slot::field("name"))
                    .delimiter(':')
                    .keyword_of::<ScType>(Slot::field("ty"))
                    .assemble(|fields| {
                        Ok(Argument {
                            name: fields.word("name")?,
                            ty: fields.object("ty")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// A callable operation with an argument list and an optional return type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: Option<ScType>,
}

impl Parseable for Operation {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Operation").rule(
                RuleBuilder::new()
                    .keyword("operation")
                    .word(Slot::field("name"))
                    .delimiter('(')
                    .optional(|arguments| {
                        arguments
                            .nested::<Argument>(Slot::list("arguments"))
                            .zero_or_more(|more| {
                                more.delimiter(',').nested::<Argument>(Slot::list("arguments"))
                            })
                    })
                    .delimiter(')')
                    .optional(|returns| {
                        returns
                            .delimiter(':')
                            .keyword_of::<ScType>(Slot::field("return_type"))
                    })
                    .assemble(|fields| {
                        Ok(Operation {
                            name: fields.word("name")?,
                            arguments: fields.objects("arguments")?,
                            return_type: fields.object_opt("return_type")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// A typed variable, optionally marked readonly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub readonly: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ScType,
}

impl Parseable for Variable {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Variable").rule(
                RuleBuilder::new()
                    .keyword("var")
                    .flag(Slot::field("readonly"), "readonly")
                    .word(Slot::field("name"))
                    .delimiter(':')
                    .keyword_of::<ScType>(Slot::field("ty"))
                    .assemble(|fields| {
                        Ok(Variable {
                            readonly: fields.flag("readonly")?,
                            name: fields.word("name")?,
                            ty: fields.object("ty")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// A named interface: events, variables and operations, interleaved
/// freely. Each member list keeps document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub events: Vec<Event>,
    pub variables: Vec<Variable>,
    pub operations: Vec<Operation>,
}

impl Parseable for Interface {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Interface").rule(
                RuleBuilder::new()
                    .keyword("interface")
                    .word(Slot::field("name"))
                    .delimiter('{')
                    .block(Repeat::ZeroOrMore, |members| {
                        members
                            .or(|event| event.nested::<Event>(Slot::list("events")))
                            .or(|variable| variable.nested::<Variable>(Slot::list("variables")))
                            .or(|operation| {
                                operation.nested::<Operation>(Slot::list("operations"))
                            })
                    })
                    .delimiter('}')
                    .assemble(|fields| {
                        Ok(Interface {
                            name: fields.word("name")?,
                            events: fields.objects("events")?,
                            variables: fields.objects("variables")?,
                            operations: fields.objects("operations")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}
