//! Applying Yes/No/Unsure answers to the session.
//!
//! Exactly one session mutation per Yes/No answer, zero per Unsure. An
//! Unsure answer reissues the same decision as a Yes/No-only follow-up
//! prefixed with the phase's explanation; the follow-up can never loop
//! because it no longer offers Unsure.

use crate::core::directive::{Answer, DecisionEdges, DecisionTarget, Directive, InputEdge};
use crate::core::phase::Phase;
use crate::core::session::{Session, TriState};

const UNSURE_FOLLOW_UP: &str = "So, based on that, will you need this? (Yes/No)";

/// Result of applying a decision answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub next_phase: Phase,
    /// The reissued Yes/No-only directive after an Unsure answer.
    pub follow_up: Option<Directive>,
}

/// Apply `answer` to the record named by `edges.target`.
///
/// Inputs arrive from the finite set the directive offered, so failures
/// here indicate a driver bug; they are reported loudly instead of
/// silently mutating state.
pub fn apply_decision(
    session: &mut Session,
    phase: Phase,
    edges: &DecisionEdges,
    answer: Answer,
) -> Result<DecisionOutcome, String> {
    match answer {
        Answer::Unsure => {
            if !edges.allow_unsure {
                return Err(format!("unsure was not offered at {phase:?}"));
            }
            let explanation = edges
                .explanation
                .as_deref()
                .ok_or_else(|| format!("no explanation available at {phase:?}"))?;
            let follow_up = Directive {
                phase,
                prompt: format!("{explanation}\n\n{UNSURE_FOLLOW_UP}"),
                input: InputEdge::Decision(DecisionEdges {
                    explanation: None,
                    allow_unsure: false,
                    ..edges.clone()
                }),
            };
            Ok(DecisionOutcome {
                next_phase: phase,
                follow_up: Some(follow_up),
            })
        }
        Answer::Yes | Answer::No => {
            let value = if answer == Answer::Yes {
                TriState::Yes
            } else {
                TriState::No
            };
            match edges.target {
                DecisionTarget::Service(key) => {
                    session.services.record_mut(key).decision = value;
                }
                DecisionTarget::Setup(step) => {
                    session.local_setup.set(step, value);
                }
            }
            Ok(DecisionOutcome {
                next_phase: if value.is_yes() { edges.yes } else { edges.no },
                follow_up: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{SetupStep, Subsystem};

    fn auth_edges() -> DecisionEdges {
        DecisionEdges {
            target: DecisionTarget::Service(Subsystem::Auth),
            yes: Phase::CollectAuthProviders,
            no: Phase::AskFirestore,
            explanation: Some("Auth handles sign-in.".to_string()),
            allow_unsure: true,
        }
    }

    #[test]
    fn yes_sets_decision_and_takes_the_yes_edge() {
        let mut session = Session::new();
        let outcome =
            apply_decision(&mut session, Phase::AskAuth, &auth_edges(), Answer::Yes)
                .expect("apply");
        assert_eq!(session.services.auth.decision, TriState::Yes);
        assert_eq!(outcome.next_phase, Phase::CollectAuthProviders);
        assert!(outcome.follow_up.is_none());
    }

    #[test]
    fn no_sets_decision_and_takes_the_no_edge() {
        let mut session = Session::new();
        let outcome = apply_decision(&mut session, Phase::AskAuth, &auth_edges(), Answer::No)
            .expect("apply");
        assert_eq!(session.services.auth.decision, TriState::No);
        assert_eq!(outcome.next_phase, Phase::AskFirestore);
    }

    /// Unsure must leave the session byte-for-byte unchanged and reissue
    /// a Yes/No-only directive carrying the explanation.
    #[test]
    fn unsure_reissues_without_mutation() {
        let mut session = Session::new();
        let before = session.clone();

        let outcome =
            apply_decision(&mut session, Phase::AskAuth, &auth_edges(), Answer::Unsure)
                .expect("apply");
        assert_eq!(session, before);
        assert_eq!(outcome.next_phase, Phase::AskAuth);

        let follow_up = outcome.follow_up.expect("follow-up directive");
        assert!(follow_up.prompt.contains("Auth handles sign-in."));
        let InputEdge::Decision(edges) = follow_up.input else {
            panic!("follow-up must stay a decision");
        };
        assert!(!edges.allow_unsure);
        assert!(edges.explanation.is_none());
        assert_eq!(edges.yes, Phase::CollectAuthProviders);
        assert_eq!(edges.no, Phase::AskFirestore);
    }

    /// Answering Unsure against the reissued form is a driver bug.
    #[test]
    fn unsure_on_the_follow_up_fails_loudly() {
        let mut session = Session::new();
        let reissued = DecisionEdges {
            explanation: None,
            allow_unsure: false,
            ..auth_edges()
        };
        let err = apply_decision(&mut session, Phase::AskAuth, &reissued, Answer::Unsure)
            .expect_err("must reject");
        assert!(err.contains("not offered"));
        assert_eq!(session, Session::new());
    }

    #[test]
    fn setup_targets_write_local_flags() {
        let mut session = Session::new();
        let edges = DecisionEdges {
            target: DecisionTarget::Setup(SetupStep::CliTools),
            yes: Phase::AskProjectInit,
            no: Phase::AskProjectInit,
            explanation: Some("CLI install notes.".to_string()),
            allow_unsure: true,
        };
        let outcome =
            apply_decision(&mut session, Phase::AskCliTools, &edges, Answer::No).expect("apply");
        assert_eq!(session.local_setup.cli_tools, TriState::No);
        assert_eq!(outcome.next_phase, Phase::AskProjectInit);
    }
}
