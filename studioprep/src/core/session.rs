//! The session aggregate: every answer collected during one interview.
//!
//! A `Session` exists for the lifetime of one conversation, is owned by the
//! driver, and is threaded explicitly through every engine operation. It is
//! never persisted by the engine; serde support exists for lab fixtures and
//! the `render` command.

use serde::{Deserialize, Serialize};

/// Decision status for a subsystem or local-setup step.
///
/// All three values matter to the completion calculator: `Unknown` means
/// not yet asked, which must stay distinguishable from an explicit `No`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    #[default]
    Unknown,
    Yes,
    No,
}

impl TriState {
    /// True only for an explicit `Yes`.
    pub fn is_yes(self) -> bool {
        matches!(self, TriState::Yes)
    }

    /// True only for an explicit `No`.
    pub fn is_no(self) -> bool {
        matches!(self, TriState::No)
    }
}

/// Optional subsystem the interview evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    Auth,
    Firestore,
    Storage,
    Functions,
    GenerativeAi,
    Platform,
}

impl Subsystem {
    /// Every subsystem, in artifact section order.
    pub const ALL: [Subsystem; 6] = [
        Subsystem::Auth,
        Subsystem::Firestore,
        Subsystem::Storage,
        Subsystem::Functions,
        Subsystem::GenerativeAi,
        Subsystem::Platform,
    ];

    /// Stable key used in fixtures and log fields.
    pub fn key(self) -> &'static str {
        match self {
            Subsystem::Auth => "auth",
            Subsystem::Firestore => "firestore",
            Subsystem::Storage => "storage",
            Subsystem::Functions => "functions",
            Subsystem::GenerativeAi => "generative_ai",
            Subsystem::Platform => "platform",
        }
    }
}

/// Local-environment readiness step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupStep {
    CliTools,
    ProjectInit,
    ClientSdk,
    AiFlow,
}

impl SetupStep {
    /// Every step, in ask order.
    pub const ALL: [SetupStep; 4] = [
        SetupStep::CliTools,
        SetupStep::ProjectInit,
        SetupStep::ClientSdk,
        SetupStep::AiFlow,
    ];

    /// Stable key used in fixtures and log fields.
    pub fn key(self) -> &'static str {
        match self {
            SetupStep::CliTools => "cli_tools",
            SetupStep::ProjectInit => "project_init",
            SetupStep::ClientSdk => "client_sdk",
            SetupStep::AiFlow => "ai_flow",
        }
    }
}

/// Per-subsystem answer: the decision plus its free-text config.
///
/// `config` holds the user's text verbatim; comma lists are split by the
/// artifact compiler, never at collection time. It is populated only when
/// the decision is `Yes` and the matching collect phase has been visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRecord {
    pub decision: TriState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl ServiceRecord {
    /// Config text, but only for an affirmed and non-blank configuration.
    pub fn active_config(&self) -> Option<&str> {
        if self.decision.is_yes() {
            self.config.as_deref().filter(|text| !text.trim().is_empty())
        } else {
            None
        }
    }
}

/// Subsystem name → record mapping, with one field per subsystem so fixture
/// JSON stays flat and typo-proof.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Services {
    pub auth: ServiceRecord,
    pub firestore: ServiceRecord,
    pub storage: ServiceRecord,
    pub functions: ServiceRecord,
    pub generative_ai: ServiceRecord,
    pub platform: ServiceRecord,
}

impl Services {
    pub fn record(&self, key: Subsystem) -> &ServiceRecord {
        match key {
            Subsystem::Auth => &self.auth,
            Subsystem::Firestore => &self.firestore,
            Subsystem::Storage => &self.storage,
            Subsystem::Functions => &self.functions,
            Subsystem::GenerativeAi => &self.generative_ai,
            Subsystem::Platform => &self.platform,
        }
    }

    pub fn record_mut(&mut self, key: Subsystem) -> &mut ServiceRecord {
        match key {
            Subsystem::Auth => &mut self.auth,
            Subsystem::Firestore => &mut self.firestore,
            Subsystem::Storage => &mut self.storage,
            Subsystem::Functions => &mut self.functions,
            Subsystem::GenerativeAi => &mut self.generative_ai,
            Subsystem::Platform => &mut self.platform,
        }
    }
}

/// Readiness flags for the local development environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalSetup {
    pub cli_tools: TriState,
    pub project_init: TriState,
    pub client_sdk: TriState,
    pub ai_flow: TriState,
}

impl LocalSetup {
    pub fn flag(&self, step: SetupStep) -> TriState {
        match step {
            SetupStep::CliTools => self.cli_tools,
            SetupStep::ProjectInit => self.project_init,
            SetupStep::ClientSdk => self.client_sdk,
            SetupStep::AiFlow => self.ai_flow,
        }
    }

    pub fn set(&mut self, step: SetupStep, value: TriState) {
        match step {
            SetupStep::CliTools => self.cli_tools = value,
            SetupStep::ProjectInit => self.project_init = value,
            SetupStep::ClientSdk => self.client_sdk = value,
            SetupStep::AiFlow => self.ai_flow = value,
        }
    }
}

/// The single mutable aggregate for one conversation.
///
/// Resetting means discarding the whole value and starting over; there is
/// no partial reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub app_idea: String,
    pub core_features: String,
    pub services: Services,
    pub local_setup: LocalSetup,
    pub console_actions_confirmed: bool,
    pub local_actions_confirmed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when "web" appears among the collected platform types.
    ///
    /// Checks the collected text itself, not the platform decision, since
    /// the decision is forced to `Yes` once types are stored.
    pub fn targets_web(&self) -> bool {
        self.services
            .platform
            .config
            .as_deref()
            .is_some_and(|types| types.to_lowercase().contains("web"))
    }

    /// Platform list for the artifact header, defaulting to "Web".
    pub fn platform_label(&self) -> &str {
        self.services
            .platform
            .config
            .as_deref()
            .filter(|types| !types.trim().is_empty())
            .unwrap_or("Web")
    }

    /// Apply the "I'm all set" override: confirm console actions and mark
    /// every local-setup flag satisfied so the final check can pass.
    pub fn mark_everything_confirmed(&mut self) {
        self.console_actions_confirmed = true;
        self.local_actions_confirmed = true;
        for step in SetupStep::ALL {
            self.local_setup.set(step, TriState::Yes);
        }
    }
}
