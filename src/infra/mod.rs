// Adapters for the ports in app::ports

pub mod omdb_client;
pub mod sqlite_store;

pub use omdb_client::OmdbClient;
pub use sqlite_store::SqliteMovieStore;
