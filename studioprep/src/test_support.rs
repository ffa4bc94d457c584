//! Test-only helpers for constructing interview sessions.

use crate::core::session::{Session, SetupStep, Subsystem, TriState};

/// Affirm a subsystem with the given config text.
pub fn affirm(session: &mut Session, key: Subsystem, config: &str) {
    let record = session.services.record_mut(key);
    record.decision = TriState::Yes;
    record.config = Some(config.to_string());
}

/// Decline a subsystem.
pub fn decline(session: &mut Session, key: Subsystem) {
    session.services.record_mut(key).decision = TriState::No;
}

/// A deterministic auth-only web session, answered through the service
/// mapping but with nothing confirmed yet.
pub fn todo_app_session() -> Session {
    let mut session = Session::new();
    session.app_idea = "TodoApp".to_string();
    session.core_features = "create tasks, mark done".to_string();
    affirm(&mut session, Subsystem::Auth, "Email, Google");
    decline(&mut session, Subsystem::Firestore);
    decline(&mut session, Subsystem::Storage);
    decline(&mut session, Subsystem::Functions);
    decline(&mut session, Subsystem::GenerativeAi);
    affirm(&mut session, Subsystem::Platform, "Web");
    session
}

/// A session that already passed every check: console confirmed and all
/// local-setup flags affirmed.
pub fn all_set_session() -> Session {
    let mut session = todo_app_session();
    session.console_actions_confirmed = true;
    for step in SetupStep::ALL {
        session.local_setup.set(step, TriState::Yes);
    }
    session
}
