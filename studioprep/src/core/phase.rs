//! Named states of the interview's fixed transition graph.

/// A phase of the interview.
///
/// Phases are immutable identifiers; transitions between them are the only
/// legal state changes, and the script in [`crate::core::script`] is the
/// single source of truth for which transitions exist. The enum order
/// follows the conversation: intro, service mapping, console recap, local
/// setup, final check, artifact generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Greeting,
    CollectAppIdea,
    CollectCoreFeatures,

    // Service mapping
    AskAuth,
    CollectAuthProviders,
    AskFirestore,
    CollectFirestoreCollections,
    AskStorage,
    CollectStoragePaths,
    AskFunctions,
    CollectFunctionsIdeas,
    AskGenerativeAi,
    CollectAiFeature,
    AskPlatform,
    CollectPlatformTypes,

    // Console recap
    ConsoleRecap,
    ConsoleWait,

    // Local setup
    AskCliTools,
    AskProjectInit,
    AskClientSdk,
    AskAiFlowInit,

    // Final check and generation
    AllSetCheck,
    ReadyWait,
    GeneratePrompt,
    PostPromptAdvice,
}

impl Phase {
    /// Every phase, in conversation order.
    pub const ALL: [Phase; 25] = [
        Phase::Greeting,
        Phase::CollectAppIdea,
        Phase::CollectCoreFeatures,
        Phase::AskAuth,
        Phase::CollectAuthProviders,
        Phase::AskFirestore,
        Phase::CollectFirestoreCollections,
        Phase::AskStorage,
        Phase::CollectStoragePaths,
        Phase::AskFunctions,
        Phase::CollectFunctionsIdeas,
        Phase::AskGenerativeAi,
        Phase::CollectAiFeature,
        Phase::AskPlatform,
        Phase::CollectPlatformTypes,
        Phase::ConsoleRecap,
        Phase::ConsoleWait,
        Phase::AskCliTools,
        Phase::AskProjectInit,
        Phase::AskClientSdk,
        Phase::AskAiFlowInit,
        Phase::AllSetCheck,
        Phase::ReadyWait,
        Phase::GeneratePrompt,
        Phase::PostPromptAdvice,
    ];
}
