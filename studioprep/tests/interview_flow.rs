//! Engine-level harness tests for full interview scenarios.
//!
//! These drive `get_directive`/`advance` through whole conversations to
//! verify end-to-end behavior: phase routing, skip resolution, tri-state
//! semantics, recap gating, and artifact compilation.

use studioprep::artifact::compile;
use studioprep::core::directive::{Answer, Directive, InputEdge};
use studioprep::core::outstanding::outstanding;
use studioprep::core::phase::Phase;
use studioprep::core::script::{Plan, plan_for};
use studioprep::core::session::{Session, TriState};
use studioprep::engine::{UserInput, advance, get_directive};
use studioprep::test_support::{affirm, all_set_session, todo_app_session};
use studioprep::core::session::Subsystem;

fn answer(session: &mut Session, phase: Phase, input: UserInput) -> Phase {
    advance(session, phase, &input).expect("advance").next_phase
}

fn decide(session: &mut Session, phase: Phase, choice: Answer) -> Phase {
    answer(session, phase, UserInput::Decision(choice))
}

fn say(session: &mut Session, phase: Phase, text: &str) -> Phase {
    answer(session, phase, UserInput::Text(text.to_string()))
}

/// Full lifecycle: auth-only TodoApp targeting the web, driven turn by
/// turn from the greeting to the compiled artifact.
///
/// Sequence: idea → features → auth yes + providers → everything else no →
/// platform types → console recap confirm → local setup all yes → final
/// check → generation.
#[test]
fn full_interview_produces_the_expected_artifact() {
    let mut session = Session::new();

    let directive = get_directive(&session, Phase::Greeting);
    assert_eq!(directive.phase, Phase::CollectAppIdea);

    let mut phase = say(&mut session, Phase::CollectAppIdea, "TodoApp");
    assert_eq!(phase, Phase::CollectCoreFeatures);

    phase = say(&mut session, phase, "create tasks, mark done");
    assert_eq!(phase, Phase::CollectCoreFeatures, "features self-loop");
    // The explicit action is the only way out of the refinement loop.
    phase = answer(&mut session, phase, UserInput::Action(0));
    assert_eq!(phase, Phase::AskAuth);

    phase = decide(&mut session, phase, Answer::Yes);
    assert_eq!(phase, Phase::CollectAuthProviders);
    phase = say(&mut session, phase, "Email, Google");

    phase = decide(&mut session, phase, Answer::No); // firestore
    phase = decide(&mut session, phase, Answer::No); // storage
    phase = decide(&mut session, phase, Answer::No); // functions
    phase = decide(&mut session, phase, Answer::No); // generative AI
    assert_eq!(phase, Phase::AskPlatform);

    phase = decide(&mut session, phase, Answer::Yes);
    phase = say(&mut session, phase, "Web");
    assert_eq!(phase, Phase::ConsoleRecap);
    assert_eq!(session.services.platform.decision, TriState::Yes);

    let recap = get_directive(&session, phase);
    assert!(recap.prompt.contains("Email, Google"));
    phase = answer(&mut session, phase, UserInput::Action(0));
    assert!(session.console_actions_confirmed);
    assert_eq!(phase, Phase::AskCliTools);

    phase = decide(&mut session, phase, Answer::Yes);
    phase = decide(&mut session, phase, Answer::Yes);
    assert_eq!(phase, Phase::AskClientSdk, "web target keeps the SDK phase");
    phase = decide(&mut session, phase, Answer::Yes);

    // Generative AI was declined, so the AI-flow phase resolves away.
    let check = get_directive(&session, phase);
    assert_eq!(check.phase, Phase::AllSetCheck);
    assert!(outstanding(&session).all_set);

    phase = answer(&mut session, Phase::AllSetCheck, UserInput::Action(0));
    assert_eq!(phase, Phase::GeneratePrompt);

    let terminal = get_directive(&session, phase);
    assert_eq!(terminal.phase, Phase::PostPromptAdvice);
    assert!(matches!(terminal.input, InputEdge::End));

    let artifact = compile(&session);
    assert!(artifact.contains("Create a Web application called \"TodoApp\"."));
    assert!(artifact.contains("**User Authentication:**"));
    assert!(artifact.contains("Email, Google"));
    assert!(!artifact.contains("**Firestore Database:**"));
    assert!(!artifact.contains("**Firebase Storage:**"));
    assert!(!artifact.contains("**Cloud Functions for Firebase:**"));
    assert!(!artifact.contains("**Generative AI"));
    assert!(artifact.contains("**General Requirements:**"));
}

/// Answering Unsure at every decision phase returns to the same phase
/// with a Yes/No-only follow-up and leaves the session untouched.
#[test]
fn unsure_never_mutates_any_decision_phase() {
    let session_template = todo_app_session();

    for phase in Phase::ALL {
        let directive = get_directive(&session_template, phase);
        let InputEdge::Decision(_) = directive.input else {
            continue;
        };

        let mut session = session_template.clone();
        let outcome = advance(
            &mut session,
            directive.phase,
            &UserInput::Decision(Answer::Unsure),
        )
        .expect("advance");

        assert_eq!(session, session_template, "{:?} mutated on unsure", phase);
        assert_eq!(outcome.next_phase, directive.phase);
        let follow_up: Directive = outcome.follow_up.expect("follow-up");
        let InputEdge::Decision(edges) = follow_up.input else {
            panic!("follow-up must stay a decision at {:?}", phase);
        };
        assert!(!edges.allow_unsure, "{:?} follow-up re-offered unsure", phase);
    }
}

/// Declining a subsystem leaves its config empty and keeps its section
/// out of the artifact.
#[test]
fn declined_subsystem_never_reaches_the_artifact() {
    let mut session = Session::new();
    session.app_idea = "Notes".to_string();
    session.core_features = "write notes".to_string();

    let next = decide(&mut session, Phase::AskFirestore, Answer::No);
    assert_eq!(next, Phase::AskStorage, "no skips the collect phase");
    assert!(session.services.firestore.config.is_none());

    let artifact = compile(&session);
    assert!(!artifact.contains("**Firestore Database:**"));
}

/// The AI-chatbot-without-web scenario: the AI-flow item stays
/// outstanding and the final check cannot pass.
#[test]
fn generative_ai_without_web_keeps_genkit_outstanding() {
    let mut session = Session::new();
    session.app_idea = "SupportBot".to_string();
    affirm(&mut session, Subsystem::GenerativeAi, "AI chatbot");
    affirm(&mut session, Subsystem::Platform, "iOS, Android");

    // No web target: the client-SDK phase must never surface.
    let directive = get_directive(&session, Phase::AskClientSdk);
    assert_eq!(directive.phase, Phase::AskAiFlowInit);

    let report = outstanding(&session);
    assert!(!report.all_set);
    assert!(
        report
            .local_items
            .iter()
            .any(|item| item.contains("genkit init"))
    );
    assert!(
        !report
            .local_items
            .iter()
            .any(|item| item.contains("web frontend"))
    );
}

/// The "I'm all set now!" override forces every flag and re-runs the
/// check, which then offers generation.
#[test]
fn override_forces_the_final_check_to_pass() {
    let mut session = todo_app_session();
    session.local_setup.cli_tools = TriState::No;

    let unready = get_directive(&session, Phase::AllSetCheck);
    assert!(unready.prompt.contains("Confirm completion"));

    // "I'm all set now!" is the first action on the unready menu.
    let phase = answer(&mut session, Phase::AllSetCheck, UserInput::Action(0));
    assert_eq!(phase, Phase::AllSetCheck);
    assert!(outstanding(&session).all_set);
    assert_eq!(session.local_setup.cli_tools, TriState::Yes);

    let ready = get_directive(&session, phase);
    assert!(
        ready
            .actions()
            .iter()
            .any(|edge| edge.effect.destination() == Phase::GeneratePrompt)
    );
}

/// Waiting before generation: typed "ready" applies the override, other
/// text is a no-op.
#[test]
fn ready_wait_accepts_typed_confirmation() {
    let mut session = todo_app_session();

    let stay = say(&mut session, Phase::ReadyWait, "one more minute");
    assert_eq!(stay, Phase::ReadyWait);
    assert!(!session.console_actions_confirmed);

    let next = say(&mut session, Phase::ReadyWait, "ok, generate it");
    assert_eq!(next, Phase::AllSetCheck);
    assert!(outstanding(&session).all_set);
}

/// A session with nothing affirmed recaps the empty console variant and
/// still reaches generation through the local-setup questions.
#[test]
fn no_service_session_reaches_generation() {
    let mut session = Session::new();
    session.app_idea = "Stopwatch".to_string();
    session.core_features = "start, stop".to_string();
    for key in [
        Subsystem::Auth,
        Subsystem::Firestore,
        Subsystem::Storage,
        Subsystem::Functions,
        Subsystem::GenerativeAi,
    ] {
        session.services.record_mut(key).decision = TriState::No;
    }
    affirm(&mut session, Subsystem::Platform, "Android");

    let recap = get_directive(&session, Phase::ConsoleRecap);
    // The platform registration line is the only console item.
    assert!(recap.prompt.contains("Android"));
    let mut phase = answer(&mut session, Phase::ConsoleRecap, UserInput::Action(0));
    assert!(session.console_actions_confirmed);

    phase = decide(&mut session, phase, Answer::Yes);
    phase = decide(&mut session, phase, Answer::Yes);

    // No web target and no generative AI: both tail phases resolve away.
    let check = get_directive(&session, phase);
    assert_eq!(check.phase, Phase::AllSetCheck);
    assert!(outstanding(&session).all_set);

    let artifact = compile(&session);
    assert!(artifact.contains("Create a Android application called \"Stopwatch\"."));
    assert!(artifact.contains("**General Requirements:**"));
}

/// Directly planning a skipped phase yields a deterministic successor
/// with no directive and no session mutation.
#[test]
fn skipped_phases_resolve_without_a_user_turn() {
    let session = all_set_session();
    let before = session.clone();

    // Web target: the SDK phase asks; drop the target and it skips.
    assert!(matches!(
        plan_for(Phase::AskClientSdk, &session),
        Plan::Ask(_)
    ));

    let mut no_web = session.clone();
    no_web.services.platform.config = Some("iOS".to_string());
    assert_eq!(
        plan_for(Phase::AskClientSdk, &no_web),
        Plan::Skip(Phase::AskAiFlowInit)
    );

    assert_eq!(session, before, "planning must not mutate");
}
