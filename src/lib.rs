//! # scdl
//!
//! A parser for the scdl statechart format.
//!
//! Grammars are declarative data: each parseable type describes itself as a
//! sequence of steps (keywords, delimiters, captures, quantified blocks) and
//! the execution engine interprets that description against a token stream,
//! committing or discarding nested transactions as it goes. See the
//! [grammar module](scdl::grammar) for the step vocabulary and the
//! [parsing module](scdl::parsing) for the engine and entry points.

pub mod scdl;
