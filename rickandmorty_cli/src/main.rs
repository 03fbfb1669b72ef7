mod commands;
mod output;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rickandmorty_lib::{CharacterClient, CharacterSearch, FixedCharacterClient, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "rickandmorty")]
#[command(about = "Search characters from the Rick and Morty API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API base URL (overrides RICKANDMORTY_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search characters by name once
    Search(commands::search::SearchArgs),
    /// Read queries from stdin, one per line, and print every state change
    Watch(commands::watch::WatchArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rickandmorty=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let mut settings = Settings::from_env();
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    match &cli.command {
        Commands::Search(args) => {
            let client = live_client(&settings)?;
            commands::search::run(args, &client, &format).await?
        }
        Commands::Watch(args) => {
            let client: Arc<dyn CharacterSearch> = if args.fixture {
                Arc::new(FixedCharacterClient::default())
            } else {
                Arc::new(live_client(&settings)?)
            };
            commands::watch::run(args, client, &settings, &format).await?
        }
    }

    Ok(())
}

fn live_client(settings: &Settings) -> Result<CharacterClient> {
    let client = CharacterClient::with_base_url(&settings.base_url)?
        .with_timeout(settings.request_timeout);
    Ok(client)
}
