//! The state machine layer: transitions, states, and the statechart root.
//!
//!     statechart Blinky {
//!         interface Buttons { .. }
//!         state off {
//!             on pressed -> glowing
//!         }
//!     }

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::scdl::grammar::{Parseable, Repeat, RuleBuilder, Slot, TypeGrammar};
use crate::scdl::model::interface::Interface;

/// `on <event> -> <target>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub event: String,
    pub target: String,
}

impl Parseable for Transition {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Transition").rule(
                RuleBuilder::new()
                    .keyword("on")
                    .word(Slot::field("event"))
                    .delimiter('-')
                    .delimiter('>')
                    .word(Slot::field("target"))
                    .assemble(|fields| {
                        Ok(Transition {
                            event: fields.word("event")?,
                            target: fields.word("target")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// A named state and its outgoing transitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub transitions: Vec<Transition>,
}

impl Parseable for State {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("State").rule(
                RuleBuilder::new()
                    .keyword("state")
                    .word(Slot::field("name"))
                    .delimiter('{')
                    .zero_or_more(|transition| {
                        transition.nested::<Transition>(Slot::list("transitions"))
                    })
                    .delimiter('}')
                    .assemble(|fields| {
                        Ok(State {
                            name: fields.word("name")?,
                            transitions: fields.objects("transitions")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}

/// The document root: interfaces and states, interleaved freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statechart {
    pub name: String,
    pub interfaces: Vec<Interface>,
    pub states: Vec<State>,
}

impl Parseable for Statechart {
    fn grammar() -> &'static TypeGrammar {
        static GRAMMAR: Lazy<TypeGrammar> = Lazy::new(|| {
            TypeGrammar::define("Statechart").rule(
                RuleBuilder::new()
                    .keyword("statechart")
                    .word(Slot::field("name"))
                    .delimiter('{')
                    .block(Repeat::ZeroOrMore, |members| {
                        members
                            .or(|interface| {
                                interface.nested::<Interface>(Slot::list("interfaces"))
                            })
                            .or(|state| state.nested::<State>(Slot::list("states")))
                    })
                    .delimiter('}')
                    .assemble(|fields| {
                        Ok(Statechart {
                            name: fields.word("name")?,
                            interfaces: fields.objects("interfaces")?,
                            states: fields.objects("states")?,
                        })
                    }),
            )
        });
        &GRAMMAR
    }
}
