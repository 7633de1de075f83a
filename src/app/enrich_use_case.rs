use std::time::Instant;

use tracing::{error, info, warn};

use crate::app::ports::{MovieLookupPort, RateLimiterPort};
use crate::error::LookupError;
use crate::observability::metrics;
use crate::types::{EnrichedFields, MovieRecord, ParsedTitle};

/// What came back from a pass over the movie list
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    pub enriched: Vec<EnrichedFields>,
    /// Number of lookups issued, hits and misses together
    pub attempted: usize,
}

/// Use case for looking up the first `cap` movies in the external catalogue
pub struct EnrichUseCase {
    lookup: Box<dyn MovieLookupPort>,
    limiter: Box<dyn RateLimiterPort>,
    cap: usize,
}

impl EnrichUseCase {
    pub fn new(lookup: Box<dyn MovieLookupPort>, limiter: Box<dyn RateLimiterPort>, cap: usize) -> Self {
        Self { lookup, limiter, cap }
    }

    /// Look up one movie. Failures are logged here and reported as `None`.
    pub async fn enrich_movie(&self, movie: &MovieRecord, title: &ParsedTitle) -> Option<EnrichedFields> {
        let year_label = title
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_default();

        metrics::enrich::lookup_attempted();
        let started = Instant::now();
        let result = self.lookup.lookup(&title.title_clean, title.release_year).await;
        metrics::enrich::lookup_duration(started.elapsed().as_secs_f64());

        match result {
            Ok(details) => {
                metrics::enrich::lookup_succeeded();
                Some(EnrichedFields::from_details(movie.movie_id, details))
            }
            Err(LookupError::NotFound(reason)) => {
                metrics::enrich::lookup_not_found();
                warn!(
                    "Movie not found in OMDb: {} ({}) - Error: {}",
                    title.title_clean, year_label, reason
                );
                None
            }
            Err(LookupError::Transport(reason)) => {
                metrics::enrich::lookup_failed();
                error!("API request failed for {} ({}): {}", title.title_clean, year_label, reason);
                None
            }
        }
    }

    /// Enrich the first `cap` movies in input order, pausing after every call.
    ///
    /// `titles` must line up index-for-index with `movies`.
    pub async fn enrich_movies(&self, movies: &[MovieRecord], titles: &[ParsedTitle]) -> EnrichmentOutcome {
        let limit = self.cap.min(movies.len());
        info!(
            "Fetching OMDb details for {} of {} movies. This may take several minutes.",
            limit,
            movies.len()
        );

        let mut outcome = EnrichmentOutcome::default();
        for (movie, title) in movies.iter().zip(titles).take(limit) {
            if let Some(fields) = self.enrich_movie(movie, title).await {
                outcome.enriched.push(fields);
            }
            outcome.attempted += 1;
            self.limiter.pause().await;
        }

        info!(
            "Enrichment finished: {} lookups issued, {} movies enriched",
            outcome.attempted,
            outcome.enriched.len()
        );
        outcome
    }
}
