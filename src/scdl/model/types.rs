//! Keyword enumerations shared across the model.

use serde::{Deserialize, Serialize};

use crate::scdl::grammar::Keywords;

/// Built-in value types a declaration can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScType {
    Void,
    Boolean,
    Integer,
    Real,
    String,
}

impl Keywords for ScType {
    const ALL: &'static [ScType] = &[
        ScType::Void,
        ScType::Boolean,
        ScType::Integer,
        ScType::Real,
        ScType::String,
    ];

    fn keyword(self) -> &'static str {
        match self {
            ScType::Void => "void",
            ScType::Boolean => "boolean",
            ScType::Integer => "integer",
            ScType::Real => "real",
            ScType::String => "string",
        }
    }
}

/// Whether an event flows into or out of the statechart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDirection {
    In,
    Out,
}

impl Keywords for EventDirection {
    const ALL: &'static [EventDirection] = &[EventDirection::In, EventDirection::Out];

    fn keyword(self) -> &'static str {
        match self {
            EventDirection::In => "in",
            EventDirection::Out => "out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve_both_ways() {
        assert_eq!(ScType::Integer.keyword(), "integer");
        assert_eq!(ScType::from_keyword("real"), Some(ScType::Real));
        assert_eq!(ScType::from_keyword("float"), None);
        assert_eq!(EventDirection::from_keyword("in"), Some(EventDirection::In));
    }
}
