use std::fs;

use tracing::{info, instrument};

use crate::app::enrich_use_case::EnrichUseCase;
use crate::app::ports::{MovieLookupPort, MovieStorePort, RateLimiterPort};
use crate::config::Config;
use crate::error::{EtlError, Result};
use crate::pipeline::extract;
use crate::pipeline::processing::enrich::merge_enrichment;
use crate::pipeline::processing::genres::normalize_genres;
use crate::pipeline::processing::title::parse_title;
use crate::types::{LoadBatch, MovieRecord, ParsedTitle, RatingRecord, RunSummary};

/// Output of the transform stage plus how many lookups it issued
#[derive(Debug)]
pub struct TransformOutput {
    pub batch: LoadBatch,
    pub lookups_attempted: usize,
    pub movies_enriched: usize,
}

/// Runs setup, extract, transform and load in that order.
///
/// Any error returned from `run` is fatal for the whole run. Per-movie
/// lookup failures never surface here.
pub struct EtlPipeline {
    config: Config,
    enricher: EnrichUseCase,
    store: Box<dyn MovieStorePort>,
}

impl EtlPipeline {
    pub fn new(
        config: Config,
        lookup: Box<dyn MovieLookupPort>,
        limiter: Box<dyn RateLimiterPort>,
        store: Box<dyn MovieStorePort>,
    ) -> Self {
        let enricher = EnrichUseCase::new(lookup, limiter, config.omdb.enrichment_cap);
        Self { config, enricher, store }
    }

    /// Read the schema script and apply it, recreating all tables
    #[instrument(skip(self))]
    pub fn setup_database(&mut self) -> Result<()> {
        let path = &self.config.paths.schema;
        info!("Setting up database tables from {}...", path.display());
        let schema_sql = fs::read_to_string(path).map_err(|source| EtlError::Schema {
            path: path.clone(),
            source,
        })?;
        self.store.apply_schema(&schema_sql)?;
        info!("Database tables created successfully.");
        Ok(())
    }

    pub fn extract(&self) -> Result<(Vec<MovieRecord>, Vec<RatingRecord>)> {
        extract::extract(&self.config.paths.movies_csv, &self.config.paths.ratings_csv)
    }

    /// Parse titles, enrich, merge, and build the genre tables
    pub async fn transform(&self, movies: Vec<MovieRecord>, ratings: Vec<RatingRecord>) -> TransformOutput {
        info!("Starting data transformation...");

        let titles: Vec<ParsedTitle> = movies.iter().map(|m| parse_title(&m.raw_title)).collect();

        let outcome = self.enricher.enrich_movies(&movies, &titles).await;
        let movies_enriched = outcome.enriched.len();
        let movie_rows = merge_enrichment(&movies, &titles, outcome.enriched);

        let genre_tables = normalize_genres(&movies);

        info!("Data transformation finished.");
        TransformOutput {
            batch: LoadBatch {
                movies: movie_rows,
                ratings,
                genres: genre_tables.genres,
                movie_genres: genre_tables.links,
            },
            lookups_attempted: outcome.attempted,
            movies_enriched,
        }
    }

    pub fn load(&mut self, batch: &LoadBatch) -> Result<()> {
        info!("Loading data into the database...");
        self.store.replace_all(batch)?;
        info!("Data loaded successfully.");
        Ok(())
    }

    /// Run the complete pipeline
    pub async fn run(&mut self) -> Result<RunSummary> {
        self.setup_database()?;

        info!("ETL process started.");
        let (movies, ratings) = self.extract()?;
        let output = self.transform(movies, ratings).await;
        self.load(&output.batch)?;
        info!("ETL process finished successfully.");

        let batch = &output.batch;
        Ok(RunSummary {
            database: self.store.location(),
            movies: batch.movies.len(),
            ratings: batch.ratings.len(),
            genres: batch.genres.len(),
            movie_genres: batch.movie_genres.len(),
            lookups_attempted: output.lookups_attempted,
            movies_enriched: output.movies_enriched,
        })
    }
}
