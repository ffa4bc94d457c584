//! Derivation of outstanding console and local-setup action items.
//!
//! Pure and idempotent: the recap phases re-invoke this on every display,
//! so repeated calls over an unchanged session must yield identical output
//! and touch nothing.

use crate::core::boilerplate::{FIRESTORE_DEV_RULES, STORAGE_DEV_RULES};
use crate::core::session::{Session, TriState};

/// Outstanding work derived from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outstanding {
    /// One descriptive line per affirmed subsystem needing console work.
    pub console_items: Vec<String>,
    /// One line per relevant local-setup flag not yet affirmed.
    pub local_items: Vec<String>,
    /// True once the artifact may be generated without an override.
    pub all_set: bool,
}

/// Compute outstanding items and the all-set gate.
///
/// Console items accrue only from subsystems whose decision is `Yes`.
/// Local items accrue from relevant flags that are not `Yes`; relevance
/// means the client-SDK item applies only to web targets and the AI-flow
/// item only when the generative-AI subsystem was affirmed. The all-set
/// gate blocks on an explicit `No` (or unconfirmed console actions), never
/// on a flag that is merely still `Unknown`.
pub fn outstanding(session: &Session) -> Outstanding {
    let services = &session.services;
    let local = &session.local_setup;

    let mut console_items = Vec::new();
    if services.auth.decision.is_yes() {
        let providers = services
            .auth
            .config
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or("as discussed");
        console_items.push(format!(
            "Enable your chosen sign-in providers ({providers}) in Firebase Console > \
             Authentication > Sign-in method."
        ));
    }
    if services.firestore.decision.is_yes() {
        console_items.push(format!(
            "In Firebase Console > Firestore Database: create the database, select a region, \
             and set initial security rules. For development you can use:\n\
             {FIRESTORE_DEV_RULES}\n\
             Remember to refine these rules before production."
        ));
    }
    if services.storage.decision.is_yes() {
        console_items.push(format!(
            "In Firebase Console > Storage: get started, select a region, and set initial \
             security rules. For development:\n\
             {STORAGE_DEV_RULES}\n\
             Refine before production."
        ));
    }
    if services.functions.decision.is_yes() {
        console_items.push(
            "Cloud Functions usually require upgrading your Firebase project to the Blaze \
             (pay-as-you-go) plan."
                .to_string(),
        );
    }
    if services.generative_ai.decision.is_yes() {
        console_items.push(
            "For Vertex AI & Genkit: ensure the Blaze plan is active, enable the Vertex AI API \
             in the Google Cloud Console, and grant your Cloud Functions service account the \
             'Vertex AI User' role."
                .to_string(),
        );
    }
    if let Some(types) = services.platform.active_config() {
        console_items.push(format!(
            "In Firebase Console > Project Overview: add your app(s) for these platforms: \
             {types}. Collect the configuration snippets (e.g. `firebaseConfig` for Web)."
        ));
    }

    let mut local_items = Vec::new();
    if local.cli_tools != TriState::Yes {
        local_items.push(
            "Install the Firebase CLI (`npm install -g firebase-tools`) and log in \
             (`firebase login`)."
                .to_string(),
        );
    }
    if local.project_init != TriState::Yes {
        local_items.push(
            "Run `firebase init` in your project root and select the services and emulators \
             you need."
                .to_string(),
        );
    }
    if session.targets_web() && local.client_sdk != TriState::Yes {
        local_items
            .push("Install and initialize the Firebase SDK in your web frontend.".to_string());
    }
    if services.generative_ai.decision.is_yes() && local.ai_flow != TriState::Yes {
        local_items.push(
            "Run `npx genkit init` in the `functions` directory and configure `genkit.conf`."
                .to_string(),
        );
    }

    let all_set = session.console_actions_confirmed
        && !local.cli_tools.is_no()
        && !local.project_init.is_no()
        && (!session.targets_web() || !local.client_sdk.is_no())
        && (!services.generative_ai.decision.is_yes() || !local.ai_flow.is_no());

    Outstanding {
        console_items,
        local_items,
        all_set,
    }
}
