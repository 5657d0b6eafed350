//! Quote-aware CSV loading for the movie dataset.
//!
//! The dataset has eight columns: title, year, duration, genre, rating,
//! description, director, stars. Quotes only toggle whether a comma
//! separates fields; they are never part of a value.

use crate::error::HarnessError;
use crate::movie::Movie;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

pub const MOVIE_FIELDS: usize = 8;

/// Splits `line` on commas outside double quotes.
///
/// The result always has exactly `expected` fields: missing trailing
/// fields are empty, surplus ones are dropped.
pub fn split_csv(line: &str, expected: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(expected);
    let mut field = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => out.push(core::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    out.push(field);
    out.resize(expected, String::new());
    out
}

fn parse_or_default<T: FromStr + Default>(column: &str, raw: &str) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        debug!(column, raw, "unparsable numeric field, using default");
        T::default()
    })
}

/// Builds a movie from one CSV record. Unparsable year or rating become 0.
pub fn parse_movie(line: &str) -> Movie {
    let mut f = split_csv(line, MOVIE_FIELDS).into_iter().map(|s| s.trim().to_string());
    let mut next = || f.next().unwrap_or_default();
    let name = next();
    let year: i32 = parse_or_default("year", &next());
    let duration = next();
    let genre = next();
    let rating: f64 = parse_or_default("rating", &next());
    Movie {
        name,
        year,
        duration,
        genre,
        rating,
        description: next(),
        director: next(),
        stars: next(),
    }
}

/// Reads at most `limit` movies from the CSV file at `path`, skipping the
/// header line and blank lines.
pub fn read_movies(path: impl AsRef<Path>, limit: usize) -> Result<Vec<Movie>, HarnessError> {
    let path = path.as_ref();
    let read_err = |source| HarnessError::Read {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(read_err)?);
    let mut movies = Vec::new();
    for line in reader.lines().skip(1) {
        if movies.len() >= limit {
            break;
        }
        let line = line.map_err(read_err)?;
        if line.trim().is_empty() {
            continue;
        }
        movies.push(parse_movie(&line));
    }
    debug!(path = %path.display(), count = movies.len(), "loaded movies");
    Ok(movies)
}
