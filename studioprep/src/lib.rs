//! Interview-driven Firebase setup assistant and prompt compiler.
//!
//! The engine walks a user through a branching questionnaire about a
//! planned app (features, optional Firebase subsystems, target platforms,
//! local tooling readiness) and compiles the answers into one structured
//! build prompt. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic dialogue logic (phases, script,
//!   decision and text collection, outstanding-items derivation). No I/O,
//!   fully testable in isolation.
//! - **[`engine`]**: The two entry points a driver talks to
//!   (`get_directive`, `advance`), including eager skip resolution.
//! - **[`artifact`]**: The pure session → prompt compiler.
//! - **[`chat`]** and **[`io`]**: The CLI driver side (transcript loop,
//!   config, fixture files). The engine never depends on these.

pub mod artifact;
pub mod chat;
pub mod core;
pub mod engine;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
