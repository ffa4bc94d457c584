//! Compiling a finished session into the final build-prompt artifact.
//!
//! `compile` is a pure function of the session: equal sessions produce
//! equal strings. Comma-delimited answers are split and trimmed here, and
//! only here; the session stores them verbatim. Sections for subsystems
//! that were declined, or affirmed but never configured, are omitted
//! entirely rather than rendered empty.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::core::boilerplate::{FIRESTORE_DEV_RULES, GENKIT_EXAMPLE, STORAGE_DEV_RULES};
use crate::core::session::Session;

const ARTIFACT_TEMPLATE: &str = include_str!("templates/artifact.md");

/// The embedded template source, exposed so the lab can hash it.
pub fn template_source() -> &'static str {
    ARTIFACT_TEMPLATE
}

#[derive(Debug, Clone, Serialize)]
struct AuthSection {
    providers: String,
}

#[derive(Debug, Clone, Serialize)]
struct FirestoreSection {
    collections_inline: String,
    first_collection: String,
}

#[derive(Debug, Clone, Serialize)]
struct StorageSection {
    paths_inline: String,
}

#[derive(Debug, Clone, Serialize)]
struct FunctionsSection {
    ideas: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct AiSection {
    feature: String,
}

/// Render the artifact from the session.
pub fn compile(session: &Session) -> String {
    let mut env = Environment::new();
    env.add_template("artifact", ARTIFACT_TEMPLATE)
        .expect("artifact template should be valid");

    let auth = session
        .services
        .auth
        .active_config()
        .map(|providers| AuthSection {
            providers: providers.trim().to_string(),
        });
    let firestore = session
        .services
        .firestore
        .active_config()
        .map(|collections| {
            let split = split_list(collections);
            FirestoreSection {
                first_collection: backticked(split.first().map_or("", String::as_str)),
                collections_inline: backtick_join(&split),
            }
        });
    let storage = session.services.storage.active_config().map(|paths| {
        let split = split_list(paths);
        StorageSection {
            paths_inline: backtick_join(&split),
        }
    });
    let functions = session
        .services
        .functions
        .active_config()
        .map(|ideas| FunctionsSection {
            ideas: split_list(ideas),
        });
    let generative_ai = session
        .services
        .generative_ai
        .active_config()
        .map(|feature| AiSection {
            feature: feature.trim().to_string(),
        });

    env.get_template("artifact")
        .expect("artifact template was just added")
        .render(context! {
            platforms => session.platform_label().trim(),
            app_idea => session.app_idea.trim(),
            features => split_list(&session.core_features),
            auth => auth,
            firestore => firestore,
            storage => storage,
            functions => functions,
            generative_ai => generative_ai,
            firestore_rules => FIRESTORE_DEV_RULES,
            storage_rules => STORAGE_DEV_RULES,
            genkit_example => GENKIT_EXAMPLE,
        })
        .expect("artifact template rendering should not fail")
}

/// Split a comma-delimited answer, trimming items and dropping blanks.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn backticked(item: &str) -> String {
    format!("`{item}`")
}

fn backtick_join(items: &[String]) -> String {
    items
        .iter()
        .map(|item| backticked(item))
        .collect::<Vec<_>>()
        .join(", ")
}
