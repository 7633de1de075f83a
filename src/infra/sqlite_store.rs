use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use crate::app::ports::MovieStorePort;
use crate::constants::{all_tables, GENRES_TABLE, MOVIES_TABLE, MOVIE_GENRES_TABLE, RATINGS_TABLE};
use crate::error::Result;
use crate::observability::metrics;
use crate::types::LoadBatch;

/// SQLite file holding the movies, ratings, genres and movie_genres tables
pub struct SqliteMovieStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteMovieStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(&path)?;
        Ok(Self { conn, path })
    }

    /// In-memory database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn count_rows(&self, table: &str) -> Result<i64> {
        let n = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(n)
    }
}

impl MovieStorePort for SqliteMovieStore {
    fn apply_schema(&mut self, schema_sql: &str) -> Result<()> {
        self.conn.execute_batch(schema_sql)?;
        debug!("Schema applied to {}", self.path.display());
        Ok(())
    }

    fn replace_all(&mut self, batch: &LoadBatch) -> Result<()> {
        let started = Instant::now();
        let tx = self.conn.transaction()?;

        for table in all_tables() {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO movies (movie_id, imdb_id, title, release_year, director, plot, box_office, rated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for m in &batch.movies {
                stmt.execute(params![
                    m.movie_id,
                    m.imdb_id,
                    m.title,
                    m.release_year,
                    m.director,
                    m.plot,
                    m.box_office,
                    m.rated,
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO ratings (user_id, movie_id, rating, timestamp) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for r in &batch.ratings {
                stmt.execute(params![r.user_id, r.movie_id, r.rating, r.timestamp])?;
            }
        }

        {
            let mut stmt = tx.prepare("INSERT INTO genres (genre_id, genre_name) VALUES (?1, ?2)")?;
            for g in &batch.genres {
                stmt.execute(params![g.genre_id, g.genre_name])?;
            }
        }

        {
            let mut stmt = tx.prepare("INSERT INTO movie_genres (movie_id, genre_id) VALUES (?1, ?2)")?;
            for l in &batch.movie_genres {
                stmt.execute(params![l.movie_id, l.genre_id])?;
            }
        }

        tx.commit()?;

        metrics::load::rows_written(MOVIES_TABLE, batch.movies.len());
        metrics::load::rows_written(RATINGS_TABLE, batch.ratings.len());
        metrics::load::rows_written(GENRES_TABLE, batch.genres.len());
        metrics::load::rows_written(MOVIE_GENRES_TABLE, batch.movie_genres.len());
        metrics::load::duration(started.elapsed().as_secs_f64());

        info!(
            "Wrote {} movies, {} ratings, {} genres, {} movie_genres rows to {}",
            batch.movies.len(),
            batch.ratings.len(),
            batch.genres.len(),
            batch.movie_genres.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GenreRecord, MovieGenreLink, MovieRow, RatingRecord};

    const SCHEMA: &str = include_str!("../../schema.sql");

    fn batch() -> LoadBatch {
        LoadBatch {
            movies: vec![
                MovieRow {
                    movie_id: 1,
                    imdb_id: Some("tt0114709".into()),
                    title: "Toy Story".into(),
                    release_year: Some(1995),
                    director: Some("John Lasseter".into()),
                    plot: None,
                    box_office: Some(223225679.0),
                    rated: Some("G".into()),
                },
                MovieRow {
                    movie_id: 2,
                    imdb_id: None,
                    title: "Unknown Film".into(),
                    release_year: None,
                    director: None,
                    plot: None,
                    box_office: None,
                    rated: None,
                },
            ],
            ratings: vec![RatingRecord { user_id: 1, movie_id: 1, rating: 4.5, timestamp: 964982703 }],
            genres: vec![GenreRecord { genre_id: 0, genre_name: "Animation".into() }],
            movie_genres: vec![MovieGenreLink { movie_id: 1, genre_id: 0 }],
        }
    }

    fn store() -> SqliteMovieStore {
        let mut store = SqliteMovieStore::open_in_memory().unwrap();
        store.apply_schema(SCHEMA).unwrap();
        store
    }

    #[test]
    fn writes_all_four_tables() {
        let mut store = store();
        store.replace_all(&batch()).unwrap();

        assert_eq!(store.count_rows("movies").unwrap(), 2);
        assert_eq!(store.count_rows("ratings").unwrap(), 1);
        assert_eq!(store.count_rows("genres").unwrap(), 1);
        assert_eq!(store.count_rows("movie_genres").unwrap(), 1);

        let (title, year, box_office): (String, Option<i32>, Option<f64>) = store
            .connection()
            .query_row(
                "SELECT title, release_year, box_office FROM movies WHERE movie_id = 2",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(title, "Unknown Film");
        assert_eq!(year, None);
        assert_eq!(box_office, None);
    }

    #[test]
    fn second_load_replaces_instead_of_appending() {
        let mut store = store();
        store.replace_all(&batch()).unwrap();
        store.replace_all(&batch()).unwrap();
        assert_eq!(store.count_rows("movies").unwrap(), 2);
        assert_eq!(store.count_rows("ratings").unwrap(), 1);
    }

    #[test]
    fn failed_load_leaves_previous_contents() {
        let mut store = store();
        store.replace_all(&batch()).unwrap();

        let mut bad = batch();
        bad.movies.push(bad.movies[0].clone());
        assert!(store.replace_all(&bad).is_err());

        assert_eq!(store.count_rows("movies").unwrap(), 2);
    }

    #[test]
    fn reapplying_schema_drops_existing_rows() {
        let mut store = store();
        store.replace_all(&batch()).unwrap();
        store.apply_schema(SCHEMA).unwrap();
        assert_eq!(store.count_rows("movies").unwrap(), 0);
    }

    #[test]
    fn broken_schema_is_an_error() {
        let mut store = SqliteMovieStore::open_in_memory().unwrap();
        assert!(store.apply_schema("CREATE TABLE (").is_err());
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.db");
        let store = SqliteMovieStore::open(&path).unwrap();
        assert_eq!(store.location(), path.display().to_string());
        assert!(path.parent().unwrap().is_dir());
    }
}
