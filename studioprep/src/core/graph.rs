//! Semantic checks over the dialogue script.
//!
//! The script is a closed table over the `Phase` enum, so most mistakes a
//! config format would catch are impossible here; what remains is checked
//! semantically: explanations present wherever Unsure is offered, collect
//! phases routed to a session field, every phase reachable from the
//! greeting, exactly one terminal phase.

use std::collections::HashSet;

use crate::core::directive::InputEdge;
use crate::core::freetext::text_successor;
use crate::core::phase::Phase;
use crate::core::script::{Plan, plan_for};
use crate::core::session::{Session, SetupStep, Subsystem, TriState};

/// Check script invariants; returns human-readable violations.
pub fn validate_script() -> Vec<String> {
    let mut errors = Vec::new();
    let probes = [probe_all_yes(), probe_all_no()];

    for phase in Phase::ALL {
        for probe in &probes {
            check_phase(phase, probe, &mut errors);
        }
    }

    let reachable = reachable_phases(&probes);
    for phase in Phase::ALL {
        if !reachable.contains(&phase) {
            errors.push(format!("{phase:?} is unreachable from Greeting"));
        }
    }

    let mut terminal = HashSet::new();
    for probe in &probes {
        for phase in Phase::ALL {
            if let Plan::Ask(directive) = plan_for(phase, probe) {
                if directive.input == InputEdge::End {
                    terminal.insert(phase);
                }
            }
        }
    }
    if terminal.len() != 1 {
        errors.push(format!(
            "expected exactly one terminal phase, found {}",
            terminal.len()
        ));
    }

    errors.sort();
    errors.dedup();
    errors
}

fn check_phase(phase: Phase, probe: &Session, errors: &mut Vec<String>) {
    match plan_for(phase, probe) {
        Plan::Skip(next) | Plan::Announce { next, .. } | Plan::Generate { next } => {
            if next == phase {
                errors.push(format!("{phase:?} resolves to itself without user input"));
            }
        }
        Plan::Ask(directive) => {
            if directive.prompt.trim().is_empty() {
                errors.push(format!("{phase:?} has an empty prompt"));
            }
            if directive.phase != phase {
                errors.push(format!("{phase:?} directive is labeled {:?}", directive.phase));
            }
            match &directive.input {
                InputEdge::Decision(edges) => {
                    if edges.allow_unsure && edges.explanation.is_none() {
                        errors.push(format!("{phase:?} offers unsure without an explanation"));
                    }
                }
                InputEdge::FreeText { .. } => {
                    if text_successor(phase).is_none() {
                        errors.push(format!("{phase:?} accepts text but routes nowhere"));
                    }
                }
                InputEdge::Menu { actions } => {
                    if actions.is_empty() {
                        errors.push(format!("{phase:?} is a menu with no actions"));
                    }
                }
                InputEdge::End => {}
            }
        }
    }
}

/// Successors of a phase under one probe session, across every edge kind.
fn successors(phase: Phase, probe: &Session) -> Vec<Phase> {
    match plan_for(phase, probe) {
        Plan::Skip(next) | Plan::Announce { next, .. } | Plan::Generate { next } => vec![next],
        Plan::Ask(directive) => {
            let mut next = Vec::new();
            if let InputEdge::Decision(edges) = &directive.input {
                next.push(edges.yes);
                next.push(edges.no);
            }
            if let Some(text_next) = text_successor(phase) {
                next.push(text_next);
            }
            next.extend(
                directive
                    .actions()
                    .iter()
                    .map(|edge| edge.effect.destination()),
            );
            next
        }
    }
}

fn reachable_phases(probes: &[Session]) -> HashSet<Phase> {
    let mut reachable = HashSet::new();
    let mut queue = vec![Phase::Greeting];
    while let Some(phase) = queue.pop() {
        if !reachable.insert(phase) {
            continue;
        }
        for probe in probes {
            queue.extend(successors(phase, probe));
        }
    }
    reachable
}

/// Probe with every subsystem affirmed and configured, every local flag
/// set, console confirmed: exercises the all-set branches.
fn probe_all_yes() -> Session {
    let mut session = Session::new();
    session.app_idea = "Probe".to_string();
    session.core_features = "one, two".to_string();
    for key in Subsystem::ALL {
        let record = session.services.record_mut(key);
        record.decision = TriState::Yes;
        record.config = Some("probe".to_string());
    }
    session.services.platform.config = Some("Web".to_string());
    for step in SetupStep::ALL {
        session.local_setup.set(step, TriState::Yes);
    }
    session.console_actions_confirmed = true;
    session
}

/// Probe with every subsystem declined: exercises skips and the empty
/// recap variant.
fn probe_all_no() -> Session {
    let mut session = Session::new();
    for key in Subsystem::ALL {
        session.services.record_mut(key).decision = TriState::No;
    }
    session
}
