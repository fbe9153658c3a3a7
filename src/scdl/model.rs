//! The scdl statechart definition model.
//!
//! These are the grammar authors: each model type registers the grammar
//! that recognizes its textual form. The engine stays generic; everything
//! statechart-specific lives here.

pub mod interface;
pub mod statechart;
pub mod types;

pub use interface::{Argument, Event, Interface, Operation, Variable};
pub use statechart::{State, Statechart, Transition};
pub use types::{EventDirection, ScType};
