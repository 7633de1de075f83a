use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{EtlError, Result};
use crate::types::{MovieRecord, RatingRecord};

/// Read every row of a headed CSV file into `T`.
///
/// Column names are matched through `T`'s serde renames, so a missing
/// required column fails the first row. Extra columns are ignored.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let input_err = |source: csv::Error| EtlError::InputFile {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(input_err)?;

    rdr.deserialize().collect::<std::result::Result<Vec<T>, _>>().map_err(input_err)
}

/// Load movies.csv, refusing inputs that repeat a movie_id
pub fn read_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let movies: Vec<MovieRecord> = read_csv(path)?;
    let mut seen = HashSet::with_capacity(movies.len());
    for m in &movies {
        if !seen.insert(m.movie_id) {
            return Err(EtlError::DuplicateMovieId(m.movie_id));
        }
    }
    Ok(movies)
}

pub fn read_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    read_csv(path)
}

/// Extract both inputs, with columns renamed to the internal schema
pub fn extract(movies_path: &Path, ratings_path: &Path) -> Result<(Vec<MovieRecord>, Vec<RatingRecord>)> {
    info!(
        "Extracting data from {} and {}...",
        movies_path.display(),
        ratings_path.display()
    );
    let movies = read_movies(movies_path)?;
    let ratings = read_ratings(ratings_path)?;
    info!("Loaded {} movies and {} ratings", movies.len(), ratings.len());
    Ok((movies, ratings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_movielens_movies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(
            &path,
            "movieId,title,genres\n\
             1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
             2,\"American President, The (1995)\",Comedy|Drama|Romance\n",
        )
        .unwrap();

        let movies = read_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].movie_id, 2);
        assert_eq!(movies[1].raw_title, "American President, The (1995)");
        assert_eq!(movies[1].genres_raw, "Comedy|Drama|Romance");
    }

    #[test]
    fn reads_ratings_with_renamed_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratings.csv");
        fs::write(&path, "userId,movieId,rating,timestamp\n1,1,4.0,964982703\n1,3,4.5,964981247\n").unwrap();

        let ratings = read_ratings(&path).unwrap();
        assert_eq!(
            ratings[1],
            RatingRecord { user_id: 1, movie_id: 3, rating: 4.5, timestamp: 964981247 }
        );
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let err = read_movies(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, EtlError::InputFile { .. }));
    }

    #[test]
    fn missing_column_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "movieId,title\n1,Toy Story (1995)\n").unwrap();
        assert!(matches!(read_movies(&path), Err(EtlError::InputFile { .. })));
    }

    #[test]
    fn duplicate_movie_id_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "movieId,title,genres\n5,A (2000),Drama\n5,B (2001),Comedy\n").unwrap();
        assert!(matches!(read_movies(&path), Err(EtlError::DuplicateMovieId(5))));
    }

    #[test]
    fn empty_genres_cell_is_allowed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        fs::write(&path, "movieId,title,genres\n1,Silent (1920),\n").unwrap();
        let movies = read_movies(&path).unwrap();
        assert_eq!(movies[0].genres_raw, "");
    }
}
