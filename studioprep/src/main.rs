//! Interview-driven Firebase setup assistant.
//!
//! Walks the user through a branching questionnaire about their planned
//! app and compiles the answers into a Firebase Studio build prompt.

use std::io::{BufReader, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use studioprep::artifact;
use studioprep::chat::{ChatStop, run_chat};
use studioprep::core::graph::validate_script;
use studioprep::core::outstanding::outstanding;
use studioprep::core::phase::Phase;
use studioprep::core::session::Session;
use studioprep::io::config::load_config;
use studioprep::io::session_file::{load_session, write_artifact};
use studioprep::logging;

const DEFAULT_CONFIG_PATH: &str = "studioprep.toml";

#[derive(Parser)]
#[command(
    name = "studioprep",
    version,
    about = "Firebase setup interview and build-prompt compiler"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive interview on stdin/stdout.
    Chat {
        /// Config file path (missing file means defaults).
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Override the artifact output path from the config.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Check the dialogue script invariants (explanations, routing,
    /// reachability).
    Validate,
    /// Compile the artifact from a saved session fixture.
    Render {
        /// Session fixture (JSON, schema-validated).
        session: PathBuf,
        /// Write the artifact here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Chat { config, out } => cmd_chat(&config, out.as_deref()),
        Command::Validate => cmd_validate(),
        Command::Render { session, out } => cmd_render(&session, out.as_deref()),
    }
}

fn cmd_chat(config_path: &Path, out_override: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;

    let stdin = std::io::stdin();
    let mut input = BufReader::new(stdin.lock());
    let mut output = std::io::stdout();

    let mut session = Session::new();
    let outcome = run_chat(&mut session, &mut input, &mut output)?;

    match outcome.stop {
        ChatStop::Abandoned => {
            info!(turns = outcome.turns, "interview abandoned before completion");
            Ok(())
        }
        ChatStop::Completed => {
            let artifact_text = outcome
                .artifact
                .context("completed interview must produce an artifact")?;
            if config.print_only && out_override.is_none() {
                info!(turns = outcome.turns, "artifact printed only");
                return Ok(());
            }
            let path = out_override
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&config.artifact_path));
            write_artifact(&path, &artifact_text)?;
            writeln!(output, "\nSaved the prompt to {}.", path.display())
                .context("write save notice")?;
            info!(path = %path.display(), turns = outcome.turns, "artifact written");
            Ok(())
        }
    }
}

fn cmd_validate() -> Result<()> {
    let errors = validate_script();
    if !errors.is_empty() {
        bail!("script violations:\n- {}", errors.join("\n- "));
    }
    println!("script ok: {} phases", Phase::ALL.len());
    Ok(())
}

fn cmd_render(session_path: &Path, out: Option<&Path>) -> Result<()> {
    let session = load_session(session_path)?;

    let report = outstanding(&session);
    if !report.all_set {
        info!(
            console_items = report.console_items.len(),
            local_items = report.local_items.len(),
            "rendering a session that is not all set"
        );
    }

    let artifact_text = artifact::compile(&session);
    match out {
        Some(path) => {
            write_artifact(path, &artifact_text)?;
            println!("wrote {}", path.display());
        }
        None => println!("{artifact_text}"),
    }
    Ok(())
}
