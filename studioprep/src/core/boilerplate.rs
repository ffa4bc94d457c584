//! Fixed boilerplate blocks embedded in recaps and the compiled artifact.
//!
//! These are quoted verbatim in the output; keep them free of template
//! syntax.

/// Development-only Firestore rules, embedded wherever the artifact or the
/// console recap tells the user to bootstrap database security.
pub const FIRESTORE_DEV_RULES: &str = "rules_version = '2';
service cloud.firestore {
  match /databases/{database}/documents {
    // For development, allow authenticated users to read/write anything.
    // WARNING: THIS IS NOT SECURE FOR PRODUCTION.
    // You MUST refine these rules before launching.
    match /{document=**} {
      allow read, write: if request.auth != null;
    }
  }
}";

/// Development-only Storage rules, same caveats as the Firestore block.
pub const STORAGE_DEV_RULES: &str = "rules_version = '2';
service firebase.storage {
  match /b/{bucket}/o {
    // For development, allow authenticated users to read/write any files.
    // WARNING: THIS IS NOT SECURE FOR PRODUCTION.
    // You MUST refine these rules before launching.
    match /{allPaths=**} {
      allow read, write: if request.auth != null;
    }
  }
}";

/// Conceptual Genkit bootstrap, embedded in the generative-AI artifact
/// section so the generated app starts from a working flow skeleton.
pub const GENKIT_EXAMPLE: &str = "// functions/src/index.ts (or your Genkit flow file)
import { initializeGenkit } from '@genkit-ai/core';
import { firebase } from '@genkit-ai/firebase';
import { googleAI } from '@genkit-ai/googleai';

initializeGenkit({
  plugins: [
    firebase(),
    googleAI({ apiKey: process.env.GEMINI_API_KEY }),
    // Or for Vertex AI:
    // import { vertexAI } from '@genkit-ai/vertexai';
    // vertexAI(),
  ],
  logLevel: 'debug',
  enableTracingAndMetrics: true,
});

// Define your flow here based on your AI feature description, e.g.:
// export const myAiChatFlow = defineFlow(
//   { name: 'myAiChatFlow', inputSchema: z.string(), outputSchema: z.string() },
//   async (prompt) => {
//     const llmResponse = await geminiPro.generate({ prompt });
//     return llmResponse.text();
//   }
// );";
