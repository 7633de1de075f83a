/// Defaults used when config.toml omits a key.
/// Table names are shared by the store and its tests.

// Input and output locations
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_MOVIES_CSV: &str = "movies.csv";
pub const DEFAULT_RATINGS_CSV: &str = "ratings.csv";
pub const DEFAULT_DATABASE: &str = "movies_analytics.db";
pub const DEFAULT_SCHEMA: &str = "schema.sql";

// OMDb
pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";
pub const DEFAULT_LOOKUP_DELAY_MS: u64 = 50;
pub const DEFAULT_ENRICHMENT_CAP: usize = 450;

// Genre field delimiter in movies.csv
pub const GENRE_DELIMITER: char = '|';

// Table names
pub const MOVIES_TABLE: &str = "movies";
pub const RATINGS_TABLE: &str = "ratings";
pub const GENRES_TABLE: &str = "genres";
pub const MOVIE_GENRES_TABLE: &str = "movie_genres";

/// Tables in the order they are cleared and reloaded
pub fn all_tables() -> [&'static str; 4] {
    [MOVIES_TABLE, RATINGS_TABLE, GENRES_TABLE, MOVIE_GENRES_TABLE]
}
