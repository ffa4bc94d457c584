//! Collecting free-text answers into the session.
//!
//! Text is stored verbatim; comma lists are split only by the artifact
//! compiler so storage stays format-preserving. Empty or whitespace-only
//! text is a no-op (same phase, no mutation), not a failure.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::phase::Phase;
use crate::core::session::{Session, Subsystem, TriState};

/// Matches a typed "I'm ready" while waiting before generation.
static READY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(ready|generate)\b").expect("ready pattern is valid"));

/// Where a phase's text lands in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    AppIdea,
    CoreFeatures,
    Config(Subsystem),
}

/// Result of applying a text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOutcome {
    pub next_phase: Phase,
    /// False when the input was rejected (blank) or interpreted without
    /// storing (the ready-wait phase); the driver should re-prompt.
    pub stored: bool,
}

/// The fixed phase → field mapping, plus each collect phase's successor.
fn route(phase: Phase) -> Option<(Slot, Phase)> {
    match phase {
        Phase::CollectAppIdea => Some((Slot::AppIdea, Phase::CollectCoreFeatures)),
        // Self-loop: features may be refined until the user explicitly
        // starts service setup.
        Phase::CollectCoreFeatures => Some((Slot::CoreFeatures, Phase::CollectCoreFeatures)),
        Phase::CollectAuthProviders => {
            Some((Slot::Config(Subsystem::Auth), Phase::AskFirestore))
        }
        Phase::CollectFirestoreCollections => {
            Some((Slot::Config(Subsystem::Firestore), Phase::AskStorage))
        }
        Phase::CollectStoragePaths => {
            Some((Slot::Config(Subsystem::Storage), Phase::AskFunctions))
        }
        Phase::CollectFunctionsIdeas => {
            Some((Slot::Config(Subsystem::Functions), Phase::AskGenerativeAi))
        }
        Phase::CollectAiFeature => {
            Some((Slot::Config(Subsystem::GenerativeAi), Phase::AskPlatform))
        }
        Phase::CollectPlatformTypes => {
            Some((Slot::Config(Subsystem::Platform), Phase::ConsoleRecap))
        }
        _ => None,
    }
}

/// Successor a collect phase advances to, for graph checks.
pub(crate) fn text_successor(phase: Phase) -> Option<Phase> {
    if phase == Phase::ReadyWait {
        return Some(Phase::AllSetCheck);
    }
    route(phase).map(|(_, next)| next)
}

/// Apply a raw text answer to `phase`.
///
/// Fails loudly when the phase does not accept text at all; that input
/// cannot come through a well-behaved driver.
pub fn apply_text(
    session: &mut Session,
    phase: Phase,
    text: &str,
) -> Result<TextOutcome, String> {
    if phase == Phase::ReadyWait {
        if READY_RE.is_match(text) {
            session.mark_everything_confirmed();
            return Ok(TextOutcome {
                next_phase: Phase::AllSetCheck,
                stored: false,
            });
        }
        return Ok(TextOutcome {
            next_phase: phase,
            stored: false,
        });
    }

    let (slot, next_phase) = route(phase)
        .ok_or_else(|| format!("phase {phase:?} does not accept free text"))?;

    if text.trim().is_empty() {
        return Ok(TextOutcome {
            next_phase: phase,
            stored: false,
        });
    }

    match slot {
        Slot::AppIdea => session.app_idea = text.to_string(),
        Slot::CoreFeatures => session.core_features = text.to_string(),
        Slot::Config(key) => {
            session.services.record_mut(key).config = Some(text.to_string());
            // Providing platform types implies the platform decision; every
            // session ends up with decision Yes here regardless of the dead
            // No edge on the ask phase.
            if key == Subsystem::Platform {
                session.services.platform.decision = TriState::Yes;
            }
        }
    }

    Ok(TextOutcome {
        next_phase,
        stored: true,
    })
}
