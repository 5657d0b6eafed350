//! Timing harness: insert, search and delete every movie title against a
//! fresh table, once per dataset ordering.
//!
//! Each phase appends one line to an append-only CSV log:
//! `label,itemCount,insertSeconds,searchSeconds,deleteSeconds`, timings
//! with nine decimals.

use crate::chained_hash_table::ChainedHashTable;
use crate::error::HarnessError;
use crate::movie::Movie;
use crate::parser::read_movies;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

pub const DEFAULT_LOG_PATH: &str = "analysis.txt";

/// Dataset ordering used for one measurement pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Ascending by rating, then title.
    Sorted,
    Shuffled,
    /// Descending by rating, then title.
    Reversed,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Sorted, Phase::Shuffled, Phase::Reversed];

    pub fn label(self) -> &'static str {
        match self {
            Phase::Sorted => "Sorted",
            Phase::Shuffled => "Shuffled",
            Phase::Reversed => "Reversed",
        }
    }
}

/// Reorders `movies` in place for `phase`.
pub fn arrange<R: Rng + ?Sized>(movies: &mut [Movie], phase: Phase, rng: &mut R) {
    match phase {
        Phase::Sorted => movies.sort_by(Movie::cmp_by_rating),
        Phase::Shuffled => movies.shuffle(rng),
        Phase::Reversed => movies.sort_by(|a, b| b.cmp_by_rating(a)),
    }
}

#[derive(Clone, Debug)]
pub struct PhaseTiming {
    pub label: String,
    pub items: usize,
    /// Titles `contains` reported present during the search pass.
    pub found: usize,
    pub insert: Duration,
    pub search: Duration,
    pub delete: Duration,
}

impl PhaseTiming {
    /// The log line for this phase, newline included.
    pub fn csv_line(&self) -> String {
        format!(
            "{},{},{:.9},{:.9},{:.9}\n",
            self.label,
            self.items,
            self.insert.as_secs_f64(),
            self.search.as_secs_f64(),
            self.delete.as_secs_f64()
        )
    }
}

/// Times one insert pass, one search pass and one delete pass over
/// `titles`, using a table built for this call only.
pub fn run_phase(label: &str, titles: &[&str]) -> PhaseTiming {
    let mut table: ChainedHashTable<&str> = ChainedHashTable::new();

    let start = Instant::now();
    for &t in titles {
        table.insert(t);
    }
    let insert = start.elapsed();

    let start = Instant::now();
    let mut found = 0;
    for t in titles {
        if table.contains(t) {
            found += 1;
        }
    }
    let search = start.elapsed();

    let start = Instant::now();
    for t in titles {
        table.remove(t);
    }
    let delete = start.elapsed();
    debug_assert!(table.is_empty());

    PhaseTiming {
        label: label.to_string(),
        items: titles.len(),
        found,
        insert,
        search,
        delete,
    }
}

/// Appends the phase's CSV line to `path`, creating the file if needed.
pub fn append_timing(path: &Path, timing: &PhaseTiming) -> Result<(), HarnessError> {
    let append_err = |source| HarnessError::Append {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(append_err)?;
    file.write_all(timing.csv_line().as_bytes())
        .map_err(append_err)
}

/// Runs every phase in [`Phase::ALL`] order, reordering `movies` before each.
pub fn run_all<R: Rng + ?Sized>(
    movies: &mut [Movie],
    rng: &mut R,
    log_path: &Path,
) -> Result<Vec<PhaseTiming>, HarnessError> {
    let mut timings = Vec::with_capacity(Phase::ALL.len());
    for phase in Phase::ALL {
        arrange(movies, phase, rng);
        let titles: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
        let timing = run_phase(phase.label(), &titles);
        info!(
            phase = timing.label.as_str(),
            items = timing.items,
            found = timing.found,
            insert_s = timing.insert.as_secs_f64(),
            search_s = timing.search.as_secs_f64(),
            delete_s = timing.delete.as_secs_f64(),
            "phase complete"
        );
        append_timing(log_path, &timing)?;
        timings.push(timing);
    }
    Ok(timings)
}

/// Settings for one harness run.
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    pub dataset: PathBuf,
    /// Maximum number of records to read after the header.
    pub lines: usize,
    pub log_path: PathBuf,
    /// Fixes the shuffle order; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl HarnessConfig {
    pub fn new(dataset: impl Into<PathBuf>, lines: usize) -> Self {
        Self {
            dataset: dataset.into(),
            lines,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            seed: None,
        }
    }
}

/// Loads the dataset and runs all phases.
pub fn run(config: &HarnessConfig) -> Result<Vec<PhaseTiming>, HarnessError> {
    let mut movies = read_movies(&config.dataset, config.lines)?;
    if movies.is_empty() {
        return Err(HarnessError::EmptyDataset(config.dataset.clone()));
    }
    info!(count = movies.len(), dataset = %config.dataset.display(), "movies loaded");
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    run_all(&mut movies, &mut rng, &config.log_path)
}
