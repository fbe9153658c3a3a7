//! Parsing tests for whole scdl documents.

use scdl::scdl::model::{EventDirection, Interface, ScType, Statechart};
use scdl::scdl::parsing::parse;

const BUTTONS: &str = r#"
interface Buttons {
    in event pressed : boolean
    var readonly clicks : integer
    operation reset() : void
    out event released
}
"#;

#[test]
fn parses_an_interface_with_interleaved_members() {
    let interface: Interface = parse(BUTTONS).unwrap();
    assert_eq!(interface.name, "Buttons");

    assert_eq!(interface.events.len(), 2);
    assert_eq!(interface.events[0].name, "pressed");
    assert_eq!(interface.events[0].direction, EventDirection::In);
    assert_eq!(interface.events[0].ty, Some(ScType::Boolean));
    assert_eq!(interface.events[1].name, "released");
    assert_eq!(interface.events[1].direction, EventDirection::Out);
    assert_eq!(interface.events[1].ty, None);

    assert_eq!(interface.variables.len(), 1);
    assert!(interface.variables[0].readonly);
    assert_eq!(interface.variables[0].name, "clicks");
    assert_eq!(interface.variables[0].ty, ScType::Integer);

    assert_eq!(interface.operations.len(), 1);
    assert_eq!(interface.operations[0].name, "reset");
    assert!(interface.operations[0].arguments.is_empty());
    assert_eq!(interface.operations[0].return_type, Some(ScType::Void));
}

#[test]
fn member_lists_keep_document_order_across_interleaving() {
    let interface: Interface = parse(
        "interface Mixed { in event first var x : integer in event second operation f() var y : real }",
    )
    .unwrap();

    let event_names: Vec<&str> = interface.events.iter().map(|e| e.name.as_str()).collect();
    let variable_names: Vec<&str> = interface
        .variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();

    assert_eq!(event_names, vec!["first", "second"]);
    assert_eq!(variable_names, vec!["x", "y"]);
    assert_eq!(interface.operations.len(), 1);
}

#[test]
fn an_empty_interface_is_valid() {
    let interface: Interface = parse("interface Empty { }").unwrap();
    assert_eq!(interface.name, "Empty");
    assert!(interface.events.is_empty());
    assert!(interface.variables.is_empty());
    assert!(interface.operations.is_empty());
}

const BLINKY: &str = r#"
// a two state blinker
statechart Blinky {
    interface Buttons {
        in event pressed
        out event released
    }
    state off {
        on pressed -> glowing
    }
    state glowing {
        on pressed -> off
        on released -> off
    }
}
"#;

#[test]
fn parses_a_statechart_document() {
    let chart: Statechart = parse(BLINKY).unwrap();
    assert_eq!(chart.name, "Blinky");

    assert_eq!(chart.interfaces.len(), 1);
    assert_eq!(chart.interfaces[0].name, "Buttons");
    assert_eq!(chart.interfaces[0].events.len(), 2);

    assert_eq!(chart.states.len(), 2);
    assert_eq!(chart.states[0].name, "off");
    assert_eq!(chart.states[0].transitions.len(), 1);
    assert_eq!(chart.states[0].transitions[0].event, "pressed");
    assert_eq!(chart.states[0].transitions[0].target, "glowing");
    assert_eq!(chart.states[1].name, "glowing");
    assert_eq!(chart.states[1].transitions.len(), 2);
}

#[test]
fn a_parsed_statechart_round_trips_through_json() {
    let chart: Statechart = parse(BLINKY).unwrap();

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["name"], "Blinky");
    assert_eq!(json["states"][0]["name"], "off");
    assert_eq!(json["interfaces"][0]["events"][0]["type"], serde_json::Value::Null);

    let back: Statechart = serde_json::from_value(json).unwrap();
    assert_eq!(back, chart);
}

#[test]
fn an_unclosed_statechart_is_a_mismatch() {
    use scdl::scdl::parsing::ParseError;

    let error = parse::<Statechart>("statechart Broken { state off {").unwrap_err();
    assert_eq!(error, ParseError::Mismatch);
}
