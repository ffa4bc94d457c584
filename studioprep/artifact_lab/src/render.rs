//! Rendering session fixtures into reviewable artifacts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

use studioprep::artifact;
use studioprep::core::outstanding::outstanding;
use studioprep::io::session_file::load_session;

use crate::cache::{LabReport, ResultStore, content_hash};

/// Summary of one lab run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub template_hash: String,
    pub rendered: u32,
    pub skipped: u32,
}

/// Render every fixture under `fixtures/` into the result store.
///
/// Results are keyed by a hash of the artifact template, so unchanged
/// fixtures are skipped until the template copy changes (or `force`).
pub fn run_lab(lab_root: &Path, force: bool) -> Result<RunSummary> {
    let template_hash = content_hash(artifact::template_source());
    let store = ResultStore::new(lab_root);
    let fixtures = discover_fixtures(&lab_root.join("fixtures"))?;

    let mut rendered = 0u32;
    let mut skipped = 0u32;
    let mut reports = Vec::new();

    for fixture_path in fixtures {
        let fixture_id = fixture_id(&fixture_path);
        if !force && store.has_rendered(&template_hash, &fixture_id) {
            debug!(fixture = %fixture_id, "already rendered for this template");
            skipped += 1;
            continue;
        }

        let session = load_session(&fixture_path)
            .with_context(|| format!("load fixture {}", fixture_path.display()))?;
        let artifact_text = artifact::compile(&session);
        let outstanding_report = outstanding(&session);

        let report = LabReport {
            fixture: fixture_id.clone(),
            template_hash: template_hash.clone(),
            all_set: outstanding_report.all_set,
            console_items: outstanding_report.console_items.len(),
            local_items: outstanding_report.local_items.len(),
        };
        store.save(&artifact_text, &report)?;
        reports.push(report);
        rendered += 1;
        info!(fixture = %fixture_id, "rendered");
    }

    store.write_index(&template_hash, &reports)?;
    Ok(RunSummary {
        template_hash,
        rendered,
        skipped,
    })
}

/// List fixture files under `fixtures/`, sorted for stable output.
pub fn discover_fixtures(fixtures_dir: &Path) -> Result<Vec<PathBuf>> {
    if !fixtures_dir.exists() {
        return Ok(Vec::new());
    }
    let mut fixtures: Vec<PathBuf> = WalkDir::new(fixtures_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    fixtures.sort();
    Ok(fixtures)
}

fn fixture_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fixture".to_string())
}
