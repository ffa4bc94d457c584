//! Artifact laboratory CLI for reviewing prompt copy changes.
//!
//! Renders saved session fixtures through the artifact compiler into a
//! result directory keyed by the template hash, so a copy edit can be
//! reviewed as a plain diff between result sets.

mod cache;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "artifact-lab")]
#[command(about = "Artifact laboratory - render session fixtures for copy review")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every fixture for the current artifact template.
    Run {
        /// Force re-render even if results exist for this template.
        #[arg(long)]
        force: bool,
    },

    /// List available fixtures.
    List,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let lab_root = find_lab_root();

    match cli.command {
        Commands::Run { force } => {
            info!(force = force, "rendering fixtures");
            let summary = render::run_lab(&lab_root, force)?;
            println!(
                "template {}: rendered {}, skipped {}",
                summary.template_hash, summary.rendered, summary.skipped
            );
        }
        Commands::List => {
            let fixtures = render::discover_fixtures(&lab_root.join("fixtures"))?;
            if fixtures.is_empty() {
                println!("no fixtures under {}", lab_root.join("fixtures").display());
            }
            for fixture in fixtures {
                println!("{}", fixture.display());
            }
        }
    }

    Ok(())
}

/// Find the lab root (where fixtures/ lives).
fn find_lab_root() -> PathBuf {
    // The compile-time manifest directory is the most reliable anchor.
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("fixtures").exists() {
        return manifest_dir;
    }

    let cwd = std::env::current_dir().ok();
    let candidates = [
        cwd.clone(),
        cwd.as_ref().map(|p| p.join("studioprep/artifact_lab")),
        cwd.as_ref().map(|p| p.join("artifact_lab")),
    ];
    for candidate in candidates.into_iter().flatten() {
        if candidate.join("fixtures").exists() {
            return candidate;
        }
    }

    manifest_dir
}
