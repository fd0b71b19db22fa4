//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};

/// Stock photo prompt CLI - describe reference images, then refine the results.
#[derive(Parser, Debug)]
#[command(name = "stockprompt", version, about)]
pub struct Cli {
    /// The action to perform.
    #[command(subcommand)]
    pub command: Command,

    /// Model name or short alias.
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands for the two request kinds.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate stock photo prompts for reference images.
    Generate {
        /// Image files to describe.
        #[arg(required = true)]
        images: Vec<String>,

        /// Directory to write one prompt text file per image.
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Rewrite a previously generated prompt per an instruction.
    Refine {
        /// The instruction describing what to change.
        instruction: String,

        /// The original prompt text.
        #[arg(short = 'p', long, conflicts_with = "original_file")]
        original: Option<String>,

        /// Path to a file containing the original prompt.
        #[arg(short = 'f', long, conflicts_with = "original")]
        original_file: Option<String>,
    },
}

impl Command {
    /// Resolve the original prompt for a refine action from either the
    /// inline flag or the file flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source is provided or the file cannot
    /// be read. Generate actions have no original prompt.
    pub fn resolve_original(&self) -> Result<String, std::io::Error> {
        match self {
            Self::Refine { original: Some(text), .. } => Ok(text.clone()),
            Self::Refine { original_file: Some(path), .. } => std::fs::read_to_string(path),
            _ => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide the original prompt with -p/--original or -f/--original-file",
            )),
        }
    }
}
