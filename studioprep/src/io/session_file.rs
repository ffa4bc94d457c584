//! Schema-validated session fixture files.
//!
//! The engine itself never persists a session; fixtures exist for the
//! `render` command and the artifact lab, where a saved session stands in
//! for a completed interview.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde_json::Value;

use crate::core::session::Session;

const SESSION_SCHEMA: &str = include_str!("../../schemas/session/v1.schema.json");

/// Load a session fixture: JSON Schema conformance first, then the typed
/// parse.
pub fn load_session(path: &Path) -> Result<Session> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let instance: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse session json {}", path.display()))?;
    let schema: Value =
        serde_json::from_str(SESSION_SCHEMA).context("parse embedded session schema")?;
    validate_schema(&instance, &schema)?;
    let session: Session = serde_json::from_str(&raw)
        .with_context(|| format!("parse session as v1 struct {}", path.display()))?;
    Ok(session)
}

/// Write the compiled artifact with a trailing newline.
pub fn write_artifact(path: &Path, artifact: &str) -> Result<()> {
    let mut payload = artifact.to_string();
    if !payload.ends_with('\n') {
        payload.push('\n');
    }
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Validate a JSON instance against a JSON Schema (Draft 2020-12).
fn validate_schema(instance: &Value, schema: &Value) -> Result<()> {
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .context("compile session schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}
