use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod render;

use cli::Cli;
use config::Settings;
use trivia_source::OpenTriviaClient;
use trivia_store::{FileBackend, LocalStorage, ScoreRepository};

const DEFAULT_LOG_FILTER: &str = "warn,trivia=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables before the log filter reads RUST_LOG
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    run(cli).await
}

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(data_file) = cli.data_file {
        settings.data_file = data_file;
    }

    tracing::debug!("Using score store at {}", settings.data_file.display());

    let storage = LocalStorage::new(FileBackend::new(&settings.data_file));
    let mut repository = ScoreRepository::new(storage);

    let source = OpenTriviaClient::with_timeout(
        settings.api_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    )?;

    commands::execute(cli.command, &settings, &mut repository, &source).await
}
