//! Content-addressed result storage.
//!
//! Rendered artifacts land at `results/{template_hash}/{fixture_id}.md`,
//! with a JSON report next to each. The hash is derived from the artifact
//! template source, so copy edits start a fresh result set and old runs
//! stay diffable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Compute a short hash of content for result keys.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..8])
}

/// Per-fixture render report, written next to the artifact.
#[derive(Debug, Clone, Serialize)]
pub struct LabReport {
    pub fixture: String,
    pub template_hash: String,
    pub all_set: bool,
    pub console_items: usize,
    pub local_items: usize,
}

/// Store for rendered artifacts keyed by template hash.
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    pub fn new(lab_root: &Path) -> Self {
        Self {
            results_dir: lab_root.join("results"),
        }
    }

    pub fn artifact_path(&self, template_hash: &str, fixture_id: &str) -> PathBuf {
        self.results_dir
            .join(template_hash)
            .join(format!("{fixture_id}.md"))
    }

    pub fn report_path(&self, template_hash: &str, fixture_id: &str) -> PathBuf {
        self.results_dir
            .join(template_hash)
            .join(format!("{fixture_id}.json"))
    }

    pub fn has_rendered(&self, template_hash: &str, fixture_id: &str) -> bool {
        self.artifact_path(template_hash, fixture_id).exists()
    }

    /// Save the artifact and its report for one fixture.
    pub fn save(&self, artifact: &str, report: &LabReport) -> Result<()> {
        let artifact_path = self.artifact_path(&report.template_hash, &report.fixture);
        if let Some(parent) = artifact_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create results dir {}", parent.display()))?;
        }

        debug!(path = %artifact_path.display(), "saving rendered artifact");
        fs::write(&artifact_path, artifact)
            .with_context(|| format!("write {}", artifact_path.display()))?;

        let report_path = self.report_path(&report.template_hash, &report.fixture);
        let payload = serde_json::to_string_pretty(report).context("serialize report")?;
        fs::write(&report_path, payload)
            .with_context(|| format!("write {}", report_path.display()))?;
        Ok(())
    }

    /// Write an index of the run for quick review.
    pub fn write_index(&self, template_hash: &str, reports: &[LabReport]) -> Result<()> {
        if reports.is_empty() {
            return Ok(());
        }
        let index = serde_json::json!({
            "template_hash": template_hash,
            "fixtures": reports.iter().map(|r| r.fixture.clone()).collect::<Vec<_>>(),
            "reports": reports,
        });
        let index_path = self.results_dir.join(template_hash).join("index.json");
        if let Some(parent) = index_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create results dir {}", parent.display()))?;
        }
        fs::write(&index_path, serde_json::to_string_pretty(&index)?)
            .with_context(|| format!("write {}", index_path.display()))?;
        debug!(path = %index_path.display(), "wrote index.json");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_deterministic_and_short() {
        let first = content_hash("Create a Web application.");
        let second = content_hash("Create a Web application.");
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
    }

    #[test]
    fn content_hash_differs_for_different_inputs() {
        assert_ne!(content_hash("one"), content_hash("two"));
    }

    #[test]
    fn result_paths_are_keyed_by_template_hash() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = ResultStore::new(temp.path());
        let path = store.artifact_path("abc123", "todo_web_auth");
        assert!(path.ends_with("results/abc123/todo_web_auth.md"));
    }

    #[test]
    fn save_writes_artifact_and_report() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = ResultStore::new(temp.path());
        let report = LabReport {
            fixture: "demo".to_string(),
            template_hash: "abc123".to_string(),
            all_set: true,
            console_items: 2,
            local_items: 0,
        };
        store.save("artifact body", &report).expect("save");
        assert!(store.has_rendered("abc123", "demo"));
        assert!(store.report_path("abc123", "demo").exists());
    }
}
