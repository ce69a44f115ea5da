use chipline::cli::{Cli, Commands};
use chipline::{Config, Profile, utils};
use clap::Parser;
use color_eyre::Result;

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration, honoring an explicit --config path
    let config = match cli.config {
        Some(ref path) => Config::load_from(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui { tags: None }) {
        Commands::Tui { tags } => {
            let seed = tags.as_deref().map(utils::split_tags).unwrap_or_default();
            let app = chipline::tui::App::new(config, seed)?;
            chipline::tui::run_event_loop(app)?;
        }
        Commands::Check {
            tags,
            max_tags,
            max_tag_length,
        } => {
            chipline::cli::handle_check(&config, tags, max_tags, max_tag_length)?;
        }
    }

    Ok(())
}
