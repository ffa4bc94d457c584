//! The dialogue script: phase-indexed prompts, edges, and skip rules.
//!
//! This table is the single source of truth for the conversation graph. It
//! reads the session but never writes it; all mutation happens in the
//! decision processor, the free-text collector, or the engine's action
//! dispatcher.

use crate::core::directive::{
    ActionEdge, ActionEffect, DecisionEdges, DecisionTarget, Directive, InputEdge,
};
use crate::core::outstanding::outstanding;
use crate::core::phase::Phase;
use crate::core::session::{Session, SetupStep, Subsystem};

/// What the script prescribes for a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The phase is irrelevant given prior answers; resolve to the
    /// successor with no user turn, no transcript entry, no mutation.
    Skip(Phase),
    /// The bot speaks and immediately moves on; the text is folded into
    /// the next answerable directive by the engine.
    Announce { text: String, next: Phase },
    /// Compile the artifact, announce it, and move on. Kept distinct from
    /// [`Plan::Announce`] so the compiler dependency stays out of the core.
    Generate { next: Phase },
    /// An answerable directive.
    Ask(Directive),
}

const GREETING: &str = "Hello! I'm your Firebase Setup & Prompt Assistant!\n\
My goal is to help you prepare your Firebase and Google Cloud environment *before* you \
start building. This helps prevent common issues and gets you to a production-ready app \
faster.";

const APP_IDEA_PROMPT: &str =
    "Let's start with the big idea. What's the name or core concept of your app?";

const CORE_FEATURES_PROMPT: &str = "What are 1-3 main things a user will DO in your app? \
(e.g. 'create posts', 'chat with friends', 'track expenses'). List them separated by \
commas; you can resubmit to refine the list before moving on.";

const AUTH_PROMPT: &str = "Will users need to create accounts or log in to your app? \
This is for **Firebase Authentication**.";
const AUTH_EXPLANATION: &str = "Firebase Authentication handles user sign-up, sign-in, and \
password recovery, and supports providers like Email/Password, Google, and Facebook. Most \
apps with user-specific data or features need this.";
const AUTH_COLLECT: &str = "Okay, Authentication it is! Which sign-in methods do you \
envision? (e.g. 'Email/Password, Google, Anonymous'). Comma-separated.";

const FIRESTORE_PROMPT: &str = "Will your app need to store and retrieve structured data, \
like user profiles, posts, or product information? This is for **Firestore Database**.";
const FIRESTORE_EXPLANATION: &str = "Firestore is a NoSQL document database for storing and \
syncing app data in real time. Use it for things like user profiles, game states, chat \
messages, or product catalogs.";
const FIRESTORE_COLLECT: &str = "Excellent, Firestore will be useful. What are some \
potential main collections you'll need? (e.g. 'users, posts, products'). Comma-separated.";

const STORAGE_PROMPT: &str = "Will users need to upload files like images, videos, or \
documents? This is for **Firebase Storage**.";
const STORAGE_EXPLANATION: &str = "Firebase Storage holds user-generated content like photos \
and videos. It is secure and integrates with Authentication and Firestore.";
const STORAGE_COLLECT: &str = "Got it, Storage is in. What are some potential folder paths \
you might use? (e.g. 'user_avatars/, product_images/'). Comma-separated.";

const FUNCTIONS_PROMPT: &str = "Will your app need custom backend logic that runs in \
response to events (like a new user signing up) or HTTP requests? This is for **Cloud \
Functions for Firebase**.";
const FUNCTIONS_EXPLANATION: &str = "Cloud Functions run backend code without managing \
servers: sending notifications, processing uploads, reacting to database events, or custom \
API endpoints. Functions usually require the Blaze (pay-as-you-go) plan.";
const FUNCTIONS_COLLECT: &str = "Cloud Functions sound like a plan. What are some ideas for \
functions you might need? (e.g. 'process new user signup, send welcome email'). \
Comma-separated.";

const GENERATIVE_AI_PROMPT: &str = "Are you planning to incorporate Generative AI features \
like chatbots, content generation, or image analysis? This would involve **Vertex AI & \
Genkit**.";
const GENERATIVE_AI_EXPLANATION: &str = "Vertex AI provides access to Google's AI models \
(like Gemini), and Genkit is a framework for building and managing AI-powered features, \
often via Cloud Functions. This typically requires the Blaze plan and enabling the Vertex \
AI API.";
const GENERATIVE_AI_COLLECT: &str = "Exciting! Describe the main AI-powered feature you're \
envisioning (e.g. 'AI chatbot for customer support').";

const PLATFORM_PROMPT: &str = "Do you already know which platform(s) you're targeting? \
(e.g. Web, iOS, Android). This helps set up the Firebase project correctly.";
const PLATFORM_EXPLANATION: &str = "Firebase supports Web, iOS, Android, and more (Unity, \
Flutter, C++). Knowing your target helps generate the right configuration snippets. Every \
app needs at least one platform, so we'll pick one either way.";
const PLATFORM_COLLECT: &str =
    "Which platforms specifically? (e.g. 'Web', 'iOS, Android', 'Web, Android'). Comma-separated.";

const CONSOLE_RECAP_HEADER: &str = "Phase 1 complete: console action summary.\n\
Based on your choices, here are the key actions to perform in your Firebase/GCP console:";
const CONSOLE_RECAP_FOOTER: &str = "Have you noted these or are you ready to perform them? \
It's important to do these before we generate the final prompt.";
const CONSOLE_RECAP_EMPTY: &str = "Looks like you haven't selected any services requiring \
specific console actions. Let's move on to local setup.";
const CONSOLE_WAIT_PROMPT: &str = "No problem! Take your time. Let me know when you've \
completed the console actions and are ready for the local setup steps.";

const CLI_TOOLS_PROMPT: &str = "Let's move to your local development environment. Are the \
Firebase CLI tools (`firebase-tools`) installed, and are you logged in (`firebase login`)?";
const CLI_TOOLS_EXPLANATION: &str = "The Firebase CLI is essential for initializing your \
project locally, deploying, and running emulators. Install it with `npm install -g \
firebase-tools`, then log in with `firebase login`.";

const PROJECT_INIT_PROMPT: &str = "Have you run `firebase init` in your project directory \
and selected the services you need (e.g. Firestore, Functions, Storage, Emulators)?";
const PROJECT_INIT_REMINDER: &str = "Remember to install `firebase-tools` and log in first!";
const PROJECT_INIT_EXPLANATION: &str = "Running `firebase init` in your project root links \
your local project to your Firebase project and sets up configuration files for the \
services you select. The emulators are highly recommended for local development.";

const CLIENT_SDK_PROMPT: &str = "For your Web app, have you installed the Firebase SDK \
(e.g. `npm install firebase`) and initialized it in your frontend code with your project's \
configuration object?";
const CLIENT_SDK_EXPLANATION: &str = "Web apps need the Firebase JavaScript SDK, installed \
via npm/yarn or a script tag, then initialized with the `firebaseConfig` object from your \
project settings in the console.";

const AI_FLOW_PROMPT: &str = "For Genkit, have you run `npx genkit init` inside your \
`functions` directory and configured your `genkit.conf` file with your chosen model and \
plugins?";
const AI_FLOW_EXPLANATION: &str = "Genkit structures your AI flows. After `firebase init \
functions`, run `npx genkit init` inside the `functions` directory, then configure \
`genkit.conf` with plugins like `@genkit-ai/googleai` or `@genkit-ai/vertexai`.";

const ALL_SET_PROMPT: &str = "Fantastic! It sounds like you've completed all the console \
and local setup actions. Ready for me to generate the build prompt for your app?";
const NOT_SET_HEADER: &str = "Local setup action summary.\n\
It looks like a few steps remain or some console actions are not yet confirmed:";
const NOT_SET_CONSOLE_ITEM: &str = "Confirm completion of all Firebase/GCP console actions.";
const NOT_SET_FOOTER: &str = "Please make sure these are done for the best experience. \
Once you're all set, let me know!";
const READY_WAIT_PROMPT: &str = "No problem, take your time with the setup. Let me know \
when you're ready to generate the prompt! (Type 'ready' or use the button below.)";

pub(crate) const GENERATED_LEAD_IN: &str = "All set! Here's your Firebase Studio prompt. \
Copy and paste the entire block below into Firebase Studio, then iterate with follow-up \
prompts.";

const ADVICE_BODY: &str = "Tips for iterating on the generated app:\n\
- Be specific in follow-up prompts: \"Add a field 'username' to the 'users' collection.\"\n\
- If something isn't right, describe what you see and what you expected.\n\
- Ask it to refactor code, add comments, or explain parts of the generated app.\n\
- Focus on one feature or change at a time for clearer results.";

/// What the script prescribes for `phase` given the session so far.
///
/// Total over [`Phase`]; every arm is pure.
pub fn plan_for(phase: Phase, session: &Session) -> Plan {
    match phase {
        Phase::Greeting => Plan::Announce {
            text: GREETING.to_string(),
            next: Phase::CollectAppIdea,
        },
        Phase::CollectAppIdea => ask_text(phase, APP_IDEA_PROMPT, Vec::new()),
        Phase::CollectCoreFeatures => ask_text(
            phase,
            CORE_FEATURES_PROMPT,
            vec![ActionEdge {
                label: "Start service setup",
                effect: ActionEffect::Advance(Phase::AskAuth),
            }],
        ),

        Phase::AskAuth => ask_service(
            phase,
            AUTH_PROMPT,
            Subsystem::Auth,
            Phase::CollectAuthProviders,
            Phase::AskFirestore,
            AUTH_EXPLANATION,
        ),
        Phase::CollectAuthProviders => ask_text(phase, AUTH_COLLECT, Vec::new()),
        Phase::AskFirestore => ask_service(
            phase,
            FIRESTORE_PROMPT,
            Subsystem::Firestore,
            Phase::CollectFirestoreCollections,
            Phase::AskStorage,
            FIRESTORE_EXPLANATION,
        ),
        Phase::CollectFirestoreCollections => ask_text(phase, FIRESTORE_COLLECT, Vec::new()),
        Phase::AskStorage => ask_service(
            phase,
            STORAGE_PROMPT,
            Subsystem::Storage,
            Phase::CollectStoragePaths,
            Phase::AskFunctions,
            STORAGE_EXPLANATION,
        ),
        Phase::CollectStoragePaths => ask_text(phase, STORAGE_COLLECT, Vec::new()),
        Phase::AskFunctions => ask_service(
            phase,
            FUNCTIONS_PROMPT,
            Subsystem::Functions,
            Phase::CollectFunctionsIdeas,
            Phase::AskGenerativeAi,
            FUNCTIONS_EXPLANATION,
        ),
        Phase::CollectFunctionsIdeas => ask_text(phase, FUNCTIONS_COLLECT, Vec::new()),
        Phase::AskGenerativeAi => ask_service(
            phase,
            GENERATIVE_AI_PROMPT,
            Subsystem::GenerativeAi,
            Phase::CollectAiFeature,
            Phase::AskPlatform,
            GENERATIVE_AI_EXPLANATION,
        ),
        Phase::CollectAiFeature => ask_text(phase, GENERATIVE_AI_COLLECT, Vec::new()),
        // Every session needs a target platform, so both edges converge on
        // collection; the No edge is kept for symmetry with the other
        // decision phases and is dead by construction.
        Phase::AskPlatform => ask_service(
            phase,
            PLATFORM_PROMPT,
            Subsystem::Platform,
            Phase::CollectPlatformTypes,
            Phase::CollectPlatformTypes,
            PLATFORM_EXPLANATION,
        ),
        Phase::CollectPlatformTypes => ask_text(phase, PLATFORM_COLLECT, Vec::new()),

        Phase::ConsoleRecap => console_recap(session),
        Phase::ConsoleWait => Plan::Ask(Directive {
            phase,
            prompt: CONSOLE_WAIT_PROMPT.to_string(),
            input: InputEdge::Menu {
                actions: vec![ActionEdge {
                    label: "I'm ready for local setup now!",
                    effect: ActionEffect::ConfirmConsole(Phase::AskCliTools),
                }],
            },
        }),

        Phase::AskCliTools => ask_setup(
            phase,
            CLI_TOOLS_PROMPT.to_string(),
            SetupStep::CliTools,
            Phase::AskProjectInit,
            CLI_TOOLS_EXPLANATION,
        ),
        Phase::AskProjectInit => {
            let mut prompt = PROJECT_INIT_PROMPT.to_string();
            if session.local_setup.cli_tools.is_no() {
                prompt = format!("{PROJECT_INIT_REMINDER} {prompt}");
            }
            ask_setup(
                phase,
                prompt,
                SetupStep::ProjectInit,
                Phase::AskClientSdk,
                PROJECT_INIT_EXPLANATION,
            )
        }
        Phase::AskClientSdk => {
            if !session.targets_web() {
                return Plan::Skip(Phase::AskAiFlowInit);
            }
            ask_setup(
                phase,
                CLIENT_SDK_PROMPT.to_string(),
                SetupStep::ClientSdk,
                Phase::AskAiFlowInit,
                CLIENT_SDK_EXPLANATION,
            )
        }
        Phase::AskAiFlowInit => {
            if !session.services.generative_ai.decision.is_yes() {
                return Plan::Skip(Phase::AllSetCheck);
            }
            ask_setup(
                phase,
                AI_FLOW_PROMPT.to_string(),
                SetupStep::AiFlow,
                Phase::AllSetCheck,
                AI_FLOW_EXPLANATION,
            )
        }

        Phase::AllSetCheck => all_set_check(session),
        Phase::ReadyWait => Plan::Ask(Directive {
            phase,
            prompt: READY_WAIT_PROMPT.to_string(),
            input: InputEdge::FreeText {
                actions: vec![ActionEdge {
                    label: "I'm ready now, generate the prompt!",
                    effect: ActionEffect::OverrideAllSet,
                }],
            },
        }),

        Phase::GeneratePrompt => Plan::Generate {
            next: Phase::PostPromptAdvice,
        },
        Phase::PostPromptAdvice => {
            let idea = if session.app_idea.trim().is_empty() {
                "Your Awesome App"
            } else {
                session.app_idea.trim()
            };
            Plan::Ask(Directive {
                phase,
                prompt: format!(
                    "{ADVICE_BODY}\n\nGood luck with your app, \"{idea}\"! To start over \
                     with a new idea, start a new session."
                ),
                input: InputEdge::End,
            })
        }
    }
}

fn ask_text(phase: Phase, prompt: &str, actions: Vec<ActionEdge>) -> Plan {
    Plan::Ask(Directive {
        phase,
        prompt: prompt.to_string(),
        input: InputEdge::FreeText { actions },
    })
}

fn ask_service(
    phase: Phase,
    prompt: &str,
    key: Subsystem,
    yes: Phase,
    no: Phase,
    explanation: &str,
) -> Plan {
    Plan::Ask(Directive {
        phase,
        prompt: prompt.to_string(),
        input: InputEdge::Decision(DecisionEdges {
            target: DecisionTarget::Service(key),
            yes,
            no,
            explanation: Some(explanation.to_string()),
            allow_unsure: true,
        }),
    })
}

/// Local-setup questions converge on the same successor either way; a `No`
/// is carried forward as an outstanding item instead of branching.
fn ask_setup(phase: Phase, prompt: String, step: SetupStep, next: Phase, explanation: &str) -> Plan {
    Plan::Ask(Directive {
        phase,
        prompt,
        input: InputEdge::Decision(DecisionEdges {
            target: DecisionTarget::Setup(step),
            yes: next,
            no: next,
            explanation: Some(explanation.to_string()),
            allow_unsure: true,
        }),
    })
}

fn console_recap(session: &Session) -> Plan {
    let report = outstanding(session);
    if report.console_items.is_empty() {
        // Nothing to do in the console counts as confirmed.
        return Plan::Ask(Directive {
            phase: Phase::ConsoleRecap,
            prompt: CONSOLE_RECAP_EMPTY.to_string(),
            input: InputEdge::Menu {
                actions: vec![ActionEdge {
                    label: "Local setup",
                    effect: ActionEffect::ConfirmConsole(Phase::AskCliTools),
                }],
            },
        });
    }

    let items = bullet_list(&report.console_items);
    Plan::Ask(Directive {
        phase: Phase::ConsoleRecap,
        prompt: format!("{CONSOLE_RECAP_HEADER}\n{items}\n{CONSOLE_RECAP_FOOTER}"),
        input: InputEdge::Menu {
            actions: vec![
                ActionEdge {
                    label: "I've done them / I'm ready!",
                    effect: ActionEffect::ConfirmConsole(Phase::AskCliTools),
                },
                ActionEdge {
                    label: "I need more time",
                    effect: ActionEffect::Advance(Phase::ConsoleWait),
                },
            ],
        },
    })
}

fn all_set_check(session: &Session) -> Plan {
    let report = outstanding(session);
    if report.all_set {
        return Plan::Ask(Directive {
            phase: Phase::AllSetCheck,
            prompt: ALL_SET_PROMPT.to_string(),
            input: InputEdge::Menu {
                actions: vec![
                    ActionEdge {
                        label: "Yes, generate the prompt!",
                        effect: ActionEffect::Advance(Phase::GeneratePrompt),
                    },
                    ActionEdge {
                        label: "Not quite, I need to fix something.",
                        effect: ActionEffect::Advance(Phase::ReadyWait),
                    },
                ],
            },
        });
    }

    let mut items = Vec::new();
    if !session.console_actions_confirmed {
        items.push(NOT_SET_CONSOLE_ITEM.to_string());
    }
    items.extend(report.local_items);
    let items = bullet_list(&items);
    Plan::Ask(Directive {
        phase: Phase::AllSetCheck,
        prompt: format!("{NOT_SET_HEADER}\n{items}\n{NOT_SET_FOOTER}"),
        input: InputEdge::Menu {
            actions: vec![
                ActionEdge {
                    label: "I'm all set now!",
                    effect: ActionEffect::OverrideAllSet,
                },
                ActionEdge {
                    label: "Okay, I'll work on these.",
                    effect: ActionEffect::Advance(Phase::ReadyWait),
                },
            ],
        },
    })
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::TriState;

    /// Every decision phase must carry an explanation so Unsure always has
    /// an answer.
    #[test]
    fn every_decision_phase_carries_an_explanation() {
        let session = Session::new();
        for phase in Phase::ALL {
            if let Plan::Ask(directive) = plan_for(phase, &session) {
                if let InputEdge::Decision(edges) = &directive.input {
                    assert!(
                        edges.explanation.is_some(),
                        "{:?} has no explanation",
                        phase
                    );
                    assert!(edges.allow_unsure, "{:?} must offer unsure", phase);
                }
            }
        }
    }

    /// The platform question is a modeled fixed point: both edges lead to
    /// type collection because every session needs a platform.
    #[test]
    fn platform_edges_converge_on_collection() {
        let session = Session::new();
        let Plan::Ask(directive) = plan_for(Phase::AskPlatform, &session) else {
            panic!("platform phase must ask");
        };
        let InputEdge::Decision(edges) = directive.input else {
            panic!("platform phase must be a decision");
        };
        assert_eq!(edges.yes, Phase::CollectPlatformTypes);
        assert_eq!(edges.no, Phase::CollectPlatformTypes);
    }

    #[test]
    fn client_sdk_phase_skips_without_web_target() {
        let mut session = Session::new();
        session.services.platform.config = Some("iOS".to_string());
        assert_eq!(
            plan_for(Phase::AskClientSdk, &session),
            Plan::Skip(Phase::AskAiFlowInit)
        );

        session.services.platform.config = Some("Web, iOS".to_string());
        assert!(matches!(
            plan_for(Phase::AskClientSdk, &session),
            Plan::Ask(_)
        ));
    }

    #[test]
    fn ai_flow_phase_skips_unless_generative_ai_affirmed() {
        let mut session = Session::new();
        assert_eq!(
            plan_for(Phase::AskAiFlowInit, &session),
            Plan::Skip(Phase::AllSetCheck)
        );

        session.services.generative_ai.decision = TriState::Yes;
        assert!(matches!(
            plan_for(Phase::AskAiFlowInit, &session),
            Plan::Ask(_)
        ));
    }

    #[test]
    fn console_recap_lists_affirmed_services() {
        let mut session = Session::new();
        session.services.auth.decision = TriState::Yes;
        session.services.auth.config = Some("Email, Google".to_string());

        let Plan::Ask(directive) = plan_for(Phase::ConsoleRecap, &session) else {
            panic!("recap must ask");
        };
        assert!(directive.prompt.contains("Email, Google"));
        assert_eq!(directive.actions().len(), 2);
    }

    #[test]
    fn console_recap_empty_variant_confirms_and_moves_on() {
        let session = Session::new();
        let Plan::Ask(directive) = plan_for(Phase::ConsoleRecap, &session) else {
            panic!("recap must ask");
        };
        assert_eq!(directive.actions().len(), 1);
        assert_eq!(
            directive.actions()[0].effect,
            ActionEffect::ConfirmConsole(Phase::AskCliTools)
        );
    }

    #[test]
    fn project_init_prompt_gains_reminder_after_cli_no() {
        let mut session = Session::new();
        session.local_setup.cli_tools = TriState::No;
        let Plan::Ask(directive) = plan_for(Phase::AskProjectInit, &session) else {
            panic!("project init must ask");
        };
        assert!(directive.prompt.starts_with(PROJECT_INIT_REMINDER));
    }

    #[test]
    fn all_set_check_offers_generation_only_when_set() {
        let mut session = Session::new();
        let Plan::Ask(unready) = plan_for(Phase::AllSetCheck, &session) else {
            panic!("check must ask");
        };
        assert!(unready.prompt.contains(NOT_SET_CONSOLE_ITEM));
        assert!(
            unready
                .actions()
                .iter()
                .all(|edge| edge.effect.destination() != Phase::GeneratePrompt)
        );

        session.mark_everything_confirmed();
        let Plan::Ask(ready) = plan_for(Phase::AllSetCheck, &session) else {
            panic!("check must ask");
        };
        assert!(
            ready
                .actions()
                .iter()
                .any(|edge| edge.effect == ActionEffect::Advance(Phase::GeneratePrompt))
        );
    }
}
