use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use movie_etl::infra::{OmdbClient, SqliteMovieStore};
use movie_etl::observability::{init_logging, metrics};
use movie_etl::pipeline::rate_limiter::FixedDelay;
use movie_etl::types::RunSummary;
use movie_etl::{Config, EtlPipeline};

#[derive(Parser)]
#[command(name = "movie_etl")]
#[command(about = "Load MovieLens data, enrich it from OMDb, and write it to SQLite")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = Config::load(cli.config.as_deref())?;

    let lookup = OmdbClient::new(&config.omdb)?;
    let limiter = FixedDelay::new(config.omdb.delay());
    let store = SqliteMovieStore::open(&config.paths.database)
        .with_context(|| format!("opening database {}", config.paths.database.display()))?;
    let pushgateway = config.metrics.pushgateway_url.clone();

    let mut pipeline = EtlPipeline::new(config, Box::new(lookup), Box::new(limiter), Box::new(store));
    let summary = pipeline.run().await?;

    if let Some(url) = pushgateway {
        metrics::push_snapshot(&url).await;
    }
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _log_guard = init_logging();
    metrics::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            info!(
                movies = summary.movies,
                ratings = summary.ratings,
                genres = summary.genres,
                movie_genres = summary.movie_genres,
                "Run complete"
            );
            println!("\n--- ETL Pipeline Complete ---");
            println!("Data has been successfully loaded into '{}'.", summary.database);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("ETL run aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
