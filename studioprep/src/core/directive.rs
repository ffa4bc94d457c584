//! Pure intent data describing what the driver should present next.
//!
//! A directive carries no callbacks and no rendering concerns: it names the
//! edges available from the current phase, and the engine is the single
//! dispatcher that applies a chosen edge to the session.

use crate::core::phase::Phase;
use crate::core::session::{SetupStep, Subsystem};

/// Raw user answer to a decision directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Unsure,
}

/// Which record a decision writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionTarget {
    Service(Subsystem),
    Setup(SetupStep),
}

impl DecisionTarget {
    /// Stable key of the targeted record, for log fields.
    pub fn key(self) -> &'static str {
        match self {
            DecisionTarget::Service(key) => key.key(),
            DecisionTarget::Setup(step) => step.key(),
        }
    }
}

/// A Yes/No decision pair, optionally answerable with Unsure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionEdges {
    pub target: DecisionTarget,
    pub yes: Phase,
    pub no: Phase,
    /// Shown when the user answers Unsure. `None` on the reissued
    /// follow-up, which must not loop.
    pub explanation: Option<String>,
    /// False on the reissued follow-up, which offers Yes/No only.
    pub allow_unsure: bool,
}

/// Effect applied when a labeled action is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Move to the phase without touching the session.
    Advance(Phase),
    /// Record that the console actions are confirmed, then move on.
    ConfirmConsole(Phase),
    /// Mark every console and local-setup item satisfied and re-run the
    /// final check.
    OverrideAllSet,
}

impl ActionEffect {
    /// The phase this effect lands on.
    pub fn destination(self) -> Phase {
        match self {
            ActionEffect::Advance(phase) | ActionEffect::ConfirmConsole(phase) => phase,
            ActionEffect::OverrideAllSet => Phase::AllSetCheck,
        }
    }
}

/// A labeled action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEdge {
    pub label: &'static str,
    pub effect: ActionEffect,
}

/// Input surface offered alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEdge {
    /// Yes/No(/Unsure) decision buttons; the text box is disabled.
    Decision(DecisionEdges),
    /// Text box, plus optional actions (e.g. the explicit way out of the
    /// core-features self-loop).
    FreeText { actions: Vec<ActionEdge> },
    /// Buttons only; the text box is disabled.
    Menu { actions: Vec<ActionEdge> },
    /// The conversation is over; there is nothing to answer.
    End,
}

/// What the driver should render for the current turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// The resolved phase this directive belongs to (never a skipped one).
    pub phase: Phase,
    pub prompt: String,
    pub input: InputEdge,
}

impl Directive {
    /// Actions offered by this directive, if any.
    pub fn actions(&self) -> &[ActionEdge] {
        match &self.input {
            InputEdge::FreeText { actions } | InputEdge::Menu { actions } => actions,
            InputEdge::Decision(_) | InputEdge::End => &[],
        }
    }
}
