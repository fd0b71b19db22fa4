//! Stockprompt - stock photo prompt generation CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod encode;
mod error;
mod model;
mod output;
mod ports;
mod prompts;
mod session;
mod store;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::context::{RecordingSession, ServiceContext};
use crate::error::PromptError;
use crate::model::resolve_model;
use crate::output::save_prompt;
use crate::session::Session;
use crate::store::Change;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PromptError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(PromptError::Config)?;

    // Resolve model
    let model = resolve_model(cli.model.as_deref().unwrap_or(&config.defaults.model));
    if cli.verbose {
        eprintln!("Model: {model}");
    }

    // Refine input validation never reaches the network; it happens before a
    // context (and API key) is even needed. An empty instruction is a warning,
    // not a hard failure, and leaves no state behind.
    let original = if let Command::Refine { instruction, .. } = &cli.command {
        if instruction.trim().is_empty() {
            eprintln!("Warning: {}", PromptError::EmptyInstruction);
            return Ok(());
        }
        Some(cli.command.resolve_original()?)
    } else {
        None
    };

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("STOCKPROMPT_REPLAY").ok();
    let is_recording = std::env::var("STOCKPROMPT_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        if cli.verbose {
            eprintln!("Recording mode enabled");
        }
        let (ctx, session) = ServiceContext::recording(&config)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config)?, None)
    };

    let mut session = Session::new(ctx.client, model);

    match &cli.command {
        Command::Generate { images, output_dir } => {
            run_generate(&mut session, images, output_dir.as_deref(), cli.verbose).await?;
        }
        Command::Refine { instruction, .. } => {
            if let Some(original) = original {
                session.restore("original", original);
                let outcome = session.refine("original", instruction).await?;
                println!("{}", outcome.display_text());
            }
        }
    }

    // The session owns the recording wrapper and with it a clone of the
    // recorder handle; it must be gone before the recorder can be unwrapped
    // and flushed to disk.
    drop(session);
    finish_recording(recording_session);

    Ok(())
}

/// Generate prompts for all images, one at a time, and render each result.
async fn run_generate(
    session: &mut Session,
    images: &[String],
    output_dir: Option<&str>,
    verbose: bool,
) -> Result<(), PromptError> {
    // Decode up front; unreadable files are skipped with a warning and do
    // not abort the rest of the batch.
    let mut loaded = Vec::new();
    for path in images {
        let name = Path::new(path)
            .file_name()
            .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());
        match image::open(path) {
            Ok(img) => loaded.push((name, img)),
            Err(e) => eprintln!("Warning: skipping {path}: {e}"),
        }
    }

    let total = loaded.len();
    let generated = session
        .generate_all(&loaded, |name, change, outcome| {
            if change == Change::Skipped {
                if verbose {
                    eprintln!("{name}: already generated, skipping");
                }
                return;
            }
            println!("# {name}");
            println!("{}", outcome.display_text());
            println!();
        })
        .await;

    if verbose {
        eprintln!("Generated {generated} of {total} prompts");
    }

    if let Some(dir) = output_dir {
        let dir = Path::new(dir);
        for (name, _) in &loaded {
            if let Some(outcome) = session.store().get(name) {
                let path = save_prompt(dir, name, &outcome.display_text())?;
                eprintln!("Saved: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Finish an active recording session, if any.
fn finish_recording(recording_session: Option<RecordingSession>) {
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }
}
