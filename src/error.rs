use std::path::PathBuf;
use thiserror::Error;

/// Errors that end the run. Anything in here is reported once by `main`
/// and turned into a non-zero exit code.
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OMDB_API_KEY is not set. Export it or add it to a .env file before running the pipeline")]
    MissingApiKey,

    #[error("Schema file '{path}' could not be read: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file '{path}' could not be read: {source}")]
    InputFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Duplicate movie_id {0} in movies input")]
    DuplicateMovieId(i64),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EtlError>;

/// Per-movie lookup failures. These are logged and skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("no match: {0}")]
    NotFound(String),

    #[error("request failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}
