//! FridgeChef - recipe assistant CLI
//!
#![doc = "FridgeChef - recipe assistant CLI"]
#![doc = "Main entry point for the FridgeChef application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fridgechef::cli::{Cli, Commands};
use fridgechef::commands;
use fridgechef::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // A missing credential is fatal before any panel runs
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { provider, panel } => {
            if let Some(p) = &provider {
                tracing::debug!("Using provider override: {}", p);
            }
            commands::chat::run_chat(config, panel).await?;
            Ok(())
        }
        Commands::Recipes { image, .. } => {
            commands::recipes::run_recipes(config, &image).await?;
            Ok(())
        }
        Commands::Ask { message, image, .. } => {
            commands::ask::run_ask(config, message, image.as_deref()).await?;
            Ok(())
        }
        Commands::About => {
            commands::about::show_about();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so transcript output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "fridgechef=debug"
    } else {
        "fridgechef=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
