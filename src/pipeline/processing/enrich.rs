use std::collections::HashMap;

use tracing::debug;

use crate::types::{EnrichedFields, LookupDetails, MovieRecord, MovieRow, ParsedTitle};

/// Turn a currency string such as `"$28,341,469"` into a number.
///
/// Dollar signs and thousands separators are stripped first. Anything that
/// still does not parse (including OMDb's `"N/A"`) becomes `None`.
pub fn normalize_box_office(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl EnrichedFields {
    /// Build the enrichment row for one movie from what the service returned
    pub fn from_details(movie_id: i64, details: LookupDetails) -> Self {
        let box_office = details.box_office.as_deref().and_then(|raw| {
            let value = normalize_box_office(raw);
            if value.is_none() {
                debug!(movie_id, raw, "Discarding unparseable box office value");
                crate::observability::metrics::enrich::box_office_discarded();
            }
            value
        });

        Self {
            movie_id,
            imdb_id: details.imdb_id,
            director: details.director,
            plot: details.plot,
            box_office,
            rated: details.rated,
        }
    }
}

/// Left join of movies with their enrichment on movie_id.
///
/// Every movie produces exactly one row, in input order. Movies with no
/// enrichment keep their title and year and get `None` for the rest.
pub fn merge_enrichment(
    movies: &[MovieRecord],
    titles: &[ParsedTitle],
    enriched: Vec<EnrichedFields>,
) -> Vec<MovieRow> {
    let mut by_id: HashMap<i64, EnrichedFields> =
        enriched.into_iter().map(|e| (e.movie_id, e)).collect();

    movies
        .iter()
        .zip(titles)
        .map(|(movie, title)| {
            let extra = by_id.remove(&movie.movie_id);
            let (imdb_id, director, plot, box_office, rated) = match extra {
                Some(e) => (e.imdb_id, e.director, e.plot, e.box_office, e.rated),
                None => (None, None, None, None, None),
            };
            MovieRow {
                movie_id: movie.movie_id,
                imdb_id,
                title: title.title_clean.clone(),
                release_year: title.release_year,
                director,
                plot,
                box_office,
                rated,
            }
        })
        .collect()
}
