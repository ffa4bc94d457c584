//! The engine: the only two entry points the driver talks to.
//!
//! `get_directive` is read-only and resolves skips and announcements
//! eagerly, so the driver always receives a single directive the user can
//! actually answer. `advance` is the single mutation entry point; it
//! re-derives the directive for the phase it is given, so a driver can
//! never smuggle in edges the script did not offer.

use anyhow::{Result, anyhow, bail};
use tracing::debug;

use crate::artifact;
use crate::core::decision::apply_decision;
use crate::core::directive::{
    ActionEdge, ActionEffect, Answer, Directive, InputEdge,
};
use crate::core::freetext::apply_text;
use crate::core::outstanding::outstanding;
use crate::core::phase::Phase;
use crate::core::script::{GENERATED_LEAD_IN, Plan, plan_for};
use crate::core::session::Session;

const FALLBACK_PROMPT: &str = "I've lost track of where we are in the setup. Let's go back \
to the final check and make sure nothing is missing.";

/// A user response to the current directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserInput {
    /// Answer to a decision directive.
    Decision(Answer),
    /// Submitted free text.
    Text(String),
    /// Index into the offered actions.
    Action(usize),
}

/// Result of one mutation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub next_phase: Phase,
    /// Present after an Unsure answer: the reissued Yes/No-only directive
    /// the driver must show instead of re-querying the script.
    pub follow_up: Option<Directive>,
}

/// Resolve `phase` to the directive the user should answer next.
///
/// Skipped phases are passed through without a transcript entry or
/// session mutation; announcement text (greeting, generated artifact) is
/// folded into the prompt of the next answerable directive. Requesting
/// the generation phase before the final check passes yields a neutral
/// fallback directive instead of an artifact.
pub fn get_directive(session: &Session, phase: Phase) -> Directive {
    let mut current = phase;
    let mut lead_in: Vec<String> = Vec::new();

    // Resolution chains are bounded by the phase count; a longer walk
    // means the script has a resolve cycle, which `validate_script`
    // rejects.
    for _ in 0..Phase::ALL.len() {
        match plan_for(current, session) {
            Plan::Skip(next) => {
                debug!(from = ?current, to = ?next, "skipping irrelevant phase");
                current = next;
            }
            Plan::Announce { text, next } => {
                lead_in.push(text);
                current = next;
            }
            Plan::Generate { next } => {
                if !outstanding(session).all_set {
                    debug!(phase = ?current, "generation requested before all-set");
                    return fallback_directive(current);
                }
                lead_in.push(format!(
                    "{GENERATED_LEAD_IN}\n\n{}",
                    artifact::compile(session)
                ));
                current = next;
            }
            Plan::Ask(mut directive) => {
                if !lead_in.is_empty() {
                    lead_in.push(directive.prompt);
                    directive.prompt = lead_in.join("\n\n");
                }
                return directive;
            }
        }
    }

    fallback_directive(phase)
}

/// Apply one user response to the session.
///
/// Dispatches to the decision processor, the free-text collector, or the
/// chosen action's effect. Input kinds that do not match the resolved
/// directive indicate a driver bug and fail loudly without mutating.
pub fn advance(session: &mut Session, phase: Phase, input: &UserInput) -> Result<Advance> {
    let directive = get_directive(session, phase);
    let resolved = directive.phase;

    match input {
        UserInput::Decision(answer) => {
            let InputEdge::Decision(edges) = &directive.input else {
                bail!("phase {resolved:?} does not take a decision answer");
            };
            let target = edges.target.key();
            let outcome = apply_decision(session, resolved, edges, *answer)
                .map_err(|err| anyhow!(err))?;
            debug!(phase = ?resolved, target, next = ?outcome.next_phase, "applied decision");
            Ok(Advance {
                next_phase: outcome.next_phase,
                follow_up: outcome.follow_up,
            })
        }
        UserInput::Text(text) => {
            if !matches!(directive.input, InputEdge::FreeText { .. }) {
                bail!("phase {resolved:?} does not take free text");
            }
            let outcome = apply_text(session, resolved, text).map_err(|err| anyhow!(err))?;
            debug!(phase = ?resolved, next = ?outcome.next_phase, stored = outcome.stored, "applied text");
            Ok(Advance {
                next_phase: outcome.next_phase,
                follow_up: None,
            })
        }
        UserInput::Action(index) => {
            let actions = directive.actions();
            let ActionEdge { effect, .. } = actions
                .get(*index)
                .ok_or_else(|| anyhow!("action {index} out of range for {resolved:?}"))?;
            let next_phase = apply_effect(session, *effect);
            debug!(phase = ?resolved, next = ?next_phase, "applied action");
            Ok(Advance {
                next_phase,
                follow_up: None,
            })
        }
    }
}

fn apply_effect(session: &mut Session, effect: ActionEffect) -> Phase {
    match effect {
        ActionEffect::Advance(next) => next,
        ActionEffect::ConfirmConsole(next) => {
            session.console_actions_confirmed = true;
            next
        }
        ActionEffect::OverrideAllSet => {
            session.mark_everything_confirmed();
            Phase::AllSetCheck
        }
    }
}

/// Neutral directive for an inconsistent request: report it and route back
/// to the final check without touching the session.
fn fallback_directive(phase: Phase) -> Directive {
    Directive {
        phase,
        prompt: FALLBACK_PROMPT.to_string(),
        input: InputEdge::Menu {
            actions: vec![ActionEdge {
                label: "Back to the setup check",
                effect: ActionEffect::Advance(Phase::AllSetCheck),
            }],
        },
    }
}
