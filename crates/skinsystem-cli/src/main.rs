//! Skin system operator CLI entrypoint.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{Commands, ProfileCommands};

#[derive(Parser)]
#[command(name = "skinsystem")]
#[command(author, version, about = "Texture profile storage inspection tool", long_about = None)]
struct Cli {
    /// Storage configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Profile { command } => match command {
            ProfileCommands::Username { username } => {
                handlers::profile_by_username(&settings, &username).await?
            }
            ProfileCommands::Id { id } => handlers::profile_by_id(&settings, id).await?,
        },
        Commands::Cape { username, output } => {
            handlers::cape(&settings, &username, output.as_deref()).await?
        }
        Commands::Decode { path } => handlers::decode(&path).await?,
        Commands::Ping => handlers::ping(&settings).await?,
        Commands::Config => handlers::show_config(&settings)?,
    }

    Ok(())
}
