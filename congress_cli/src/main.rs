mod commands;
mod output;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use congress_api::{CancellationToken, ClientOptions, CongressClient};

use crate::output::OutputFormat;

const API_KEY_ENV: &str = "CONGRESS_API_KEY";

#[derive(Parser)]
#[command(name = "congress")]
#[command(about = "Query bills, members and amendments from the Congress.gov API")]
struct Cli {
    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API key (defaults to $CONGRESS_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bills, newest update first
    Bills(commands::bills::BillsArgs),
    /// Show a single bill
    Bill(commands::bills::BillArgs),
    /// List members of Congress
    Members(commands::members::MembersArgs),
    /// List amendments
    Amendments(commands::amendments::AmendmentsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("congress=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let api_key = match cli.api_key.or_else(|| std::env::var(API_KEY_ENV).ok()) {
        Some(key) if !key.trim().is_empty() => key,
        _ => bail!("missing API key: pass --api-key or set {}", API_KEY_ENV),
    };
    let options = ClientOptions::from_env()?;
    let client = CongressClient::with_options(api_key, options)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling outstanding requests");
            on_interrupt.cancel();
        }
    });

    match &cli.command {
        Commands::Bills(args) => commands::bills::run(args, &client, &format, &cancel).await?,
        Commands::Bill(args) => commands::bills::show(args, &client, &format, &cancel).await?,
        Commands::Members(args) => {
            commands::members::run(args, &client, &format, &cancel).await?
        }
        Commands::Amendments(args) => {
            commands::amendments::run(args, &client, &format, &cancel).await?
        }
    }

    Ok(())
}
