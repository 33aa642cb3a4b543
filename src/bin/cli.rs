use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::config::{LogFormat, LogSettings};
use trivia_api::db::transfer::{export_data, import_data};
use trivia_api::db::{connect, run_migrations};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database URL, e.g. sqlite:trivia.db
    db_url: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Dump categories and questions as CSV into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&LogSettings {
        level: "info".to_owned(),
        format: LogFormat::Pretty,
        span_events: false,
    });
    let cli = Cli::parse();
    let pool = connect(&cli.db_url).await.context("Cannot connect to DB")?;
    run_migrations(&pool).await?;
    match cli.command {
        Commands::Export { path } => export_data(&pool, &path).await.context("Cannot export"),
        Commands::Import { path } => import_data(&pool, &path).await.context("Cannot import"),
    }
}
