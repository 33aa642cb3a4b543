use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trivia_api::config::Settings;
use trivia_api::db::{self, SqliteStore};
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Settings file, `trivia.toml` in the working directory if omitted
    #[clap(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    init_tracing(&settings.log);

    let pool = db::establish_connection(&settings.database)
        .await
        .context("Cannot connect to DB")?;
    if settings.database.run_migrations {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool).await?;
    }

    run_server(SqliteStore::new(pool), &settings.server).await
}
