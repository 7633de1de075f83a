use serde::Deserialize;

/// A movies.csv row, with columns remapped to the internal naming
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    #[serde(rename = "title")]
    pub raw_title: String,
    #[serde(rename = "genres")]
    pub genres_raw: String,
}

/// A ratings.csv row. Only the field names change on the way through.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub rating: f64,
    pub timestamp: i64,
}

/// Title and year split out of a raw MovieLens title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    pub title_clean: String,
    pub release_year: Option<i32>,
}

/// Fields of interest from a successful OMDb lookup, as the service sent them
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LookupDetails {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
    #[serde(rename = "Rated")]
    pub rated: Option<String>,
}

/// Enrichment for one movie, with box office already normalized
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFields {
    pub movie_id: i64,
    pub imdb_id: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub box_office: Option<f64>,
    pub rated: Option<String>,
}

/// Final shape of a row in the movies table
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRow {
    pub movie_id: i64,
    pub imdb_id: Option<String>,
    pub title: String,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub box_office: Option<f64>,
    pub rated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreRecord {
    pub genre_id: i64,
    pub genre_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieGenreLink {
    pub movie_id: i64,
    pub genre_id: i64,
}

/// Everything the load stage writes, one field per table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadBatch {
    pub movies: Vec<MovieRow>,
    pub ratings: Vec<RatingRecord>,
    pub genres: Vec<GenreRecord>,
    pub movie_genres: Vec<MovieGenreLink>,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub database: String,
    pub movies: usize,
    pub ratings: usize,
    pub genres: usize,
    pub movie_genres: usize,
    pub lookups_attempted: usize,
    pub movies_enriched: usize,
}
