use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod db;
mod logging;

use commands::{ConfigCommand, SeedCommand, TailwindCommand, UserCommand, VerifyCommand};
use config::Config;
use db::init_store;
use footstats_core::{SeedError, SeedStep};

#[derive(Parser)]
#[command(name = "footstats")]
#[command(version)]
#[command(about = "Bootstrap tooling for the footstats environment", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database user and reset reference collections
    Seed(SeedCommand),

    /// Check the state left by a previous seed
    Verify(VerifyCommand),

    /// Check that the database server is reachable
    Ping,

    /// Inspect database users
    User(UserCommand),

    /// Tailwind scan declaration
    Tailwind(TailwindCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config show
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;
    logging::init(&config);

    match cli.command {
        Some(Commands::Seed(cmd)) => {
            let store = init_store(&config).await.map_err(|source| SeedError {
                step: SeedStep::Connect,
                source,
            })?;
            cmd.run(&store).await?;
        }
        Some(Commands::Verify(cmd)) => {
            let store = init_store(&config).await?;
            cmd.run(&store).await?;
        }
        Some(Commands::Ping) => {
            init_store(&config).await?;
            println!("✓ {} is reachable", config.redacted_uri());
        }
        Some(Commands::User(cmd)) => {
            let store = init_store(&config).await?;
            cmd.run(&store).await?;
        }
        Some(Commands::Tailwind(cmd)) => {
            cmd.run()?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
