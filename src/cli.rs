use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::collection::TagCollection;
use crate::config::{Config, ConfigError};

#[derive(Parser)]
#[command(name = "chipline")]
#[command(about = "Tag-chip input for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses a separate dev config)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive widget (default if no subcommand)
    Tui {
        /// Comma-separated tags to seed the collection with
        #[arg(long)]
        tags: Option<String>,
    },
    /// Run candidate tags through the acceptance policy and report each one
    Check {
        /// Candidate tags, checked in order
        tags: Vec<String>,
        /// Override the configured tag count cap
        #[arg(long)]
        max_tags: Option<usize>,
        /// Override the configured tag length cap
        #[arg(long)]
        max_tag_length: Option<usize>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Handle the check command: feed every candidate to a fresh collection and
/// print whether it was accepted, with the reason when it was not
pub fn handle_check(
    config: &Config,
    tags: Vec<String>,
    max_tags: Option<usize>,
    max_tag_length: Option<usize>,
) -> Result<(), CliError> {
    let mut options = config.tag_options()?;
    if max_tags.is_some() {
        options.max_tags = max_tags;
    }
    if max_tag_length.is_some() {
        options.max_tag_length = max_tag_length;
    }

    let mut collection = TagCollection::new(options);
    for candidate in &tags {
        match collection.vet(candidate) {
            Ok(()) => {
                collection.add(candidate);
                println!("accepted  {}", candidate);
            }
            Err(reason) => {
                println!("rejected  {}  ({})", candidate, reason);
            }
        }
    }
    println!(
        "{} of {} accepted: {}",
        collection.len(),
        tags.len(),
        collection.tags().join(", ")
    );

    Ok(())
}
