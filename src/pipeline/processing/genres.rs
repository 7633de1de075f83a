use std::collections::{HashMap, HashSet};

use crate::constants::GENRE_DELIMITER;
use crate::types::{GenreRecord, MovieGenreLink, MovieRecord};

/// The genre dimension and the movie/genre link table built from it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreTables {
    pub genres: Vec<GenreRecord>,
    pub links: Vec<MovieGenreLink>,
}

/// Split a pipe-delimited genre field into trimmed, non-empty names
pub fn split_genres(genres_raw: &str) -> impl Iterator<Item = &str> {
    genres_raw
        .split(GENRE_DELIMITER)
        .map(str::trim)
        .filter(|g| !g.is_empty())
}

/// Explode every movie's genre list into a deduplicated genre table and
/// one link per (movie, genre) pair.
///
/// Ids are handed out from 0 in order of first appearance, so the same
/// input order always yields the same ids.
pub fn normalize_genres(movies: &[MovieRecord]) -> GenreTables {
    let mut ids: HashMap<&str, i64> = HashMap::new();
    let mut genres = Vec::new();

    for movie in movies {
        for name in split_genres(&movie.genres_raw) {
            if !ids.contains_key(name) {
                let genre_id = genres.len() as i64;
                ids.insert(name, genre_id);
                genres.push(GenreRecord {
                    genre_id,
                    genre_name: name.to_string(),
                });
            }
        }
    }

    let mut links = Vec::new();
    for movie in movies {
        let mut seen: HashSet<i64> = HashSet::new();
        for name in split_genres(&movie.genres_raw) {
            // Every token was registered above; the lookup is the join
            if let Some(&genre_id) = ids.get(name) {
                if seen.insert(genre_id) {
                    links.push(MovieGenreLink {
                        movie_id: movie.movie_id,
                        genre_id,
                    });
                }
            }
        }
    }

    GenreTables { genres, links }
}
