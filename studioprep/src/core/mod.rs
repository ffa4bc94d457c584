//! Deterministic, pure dialogue logic.
//!
//! Core modules must be free of I/O side effects. They operate on the
//! in-memory session and return deterministic outputs suitable for tests;
//! the engine and the CLI driver live above this layer.

pub mod boilerplate;
pub mod decision;
pub mod directive;
pub mod freetext;
pub mod graph;
pub mod outstanding;
pub mod phase;
pub mod script;
pub mod session;
