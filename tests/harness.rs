// End-to-end harness tests: CSV on disk -> three timed phases -> log lines.
use chained_table::harness::{self, HarnessConfig, Phase};
use chained_table::HarnessError;
use std::io::Write;

const HEADER: &str = "Movie Name,Year of Release,Run Time in minutes,Genre,Movie Rating,Description,Director,Stars";

fn dataset(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    writeln!(f, "{HEADER}").unwrap();
    for r in rows {
        writeln!(f, "{r}").unwrap();
    }
    f.flush().unwrap();
    f
}

// Verifies: one log line per phase, in order, with item count and three
// nine-decimal timing fields.
#[test]
fn run_appends_one_line_per_phase() {
    let data = dataset(&[
        r#"Inception,2010,148,"Action, Sci-Fi",8.8,"A thief, who steals secrets.",Christopher Nolan,"Leonardo DiCaprio, Joseph Gordon-Levitt""#,
        "Up,2009,96,Animation,8.3,Balloons,Pete Docter,Ed Asner",
        "Up,2009,96,Animation,8.3,Balloons,Pete Docter,Ed Asner",
        "Coco,2017,105,Animation,8.4,Music,Lee Unkrich,Anthony Gonzalez",
    ]);
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig {
        log_path: dir.path().join("analysis.txt"),
        seed: Some(3),
        ..HarnessConfig::new(data.path(), 100)
    };

    let timings = harness::run(&config).unwrap();
    assert_eq!(timings.len(), 3);

    let text = std::fs::read_to_string(&config.log_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, phase) in lines.iter().zip(Phase::ALL) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5, "{line}");
        assert_eq!(fields[0], phase.label());
        assert_eq!(fields[1], "4");
        for secs in &fields[2..] {
            let (_, frac) = secs.split_once('.').expect("decimal point");
            assert_eq!(frac.len(), 9, "{secs}");
            assert!(secs.parse::<f64>().unwrap() >= 0.0);
        }
    }

    // A second run keeps the earlier lines.
    harness::run(&config).unwrap();
    let text = std::fs::read_to_string(&config.log_path).unwrap();
    assert_eq!(text.lines().count(), 6);
}

// Verifies: the line limit caps how many records are timed.
#[test]
fn line_limit_caps_items() {
    let rows: Vec<String> = (0..20)
        .map(|i| format!("Movie {i},2000,90,Drama,{}.0,d,dir,stars", i % 10))
        .collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let data = dataset(&refs);
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig {
        log_path: dir.path().join("analysis.txt"),
        ..HarnessConfig::new(data.path(), 7)
    };
    let timings = harness::run(&config).unwrap();
    assert!(timings.iter().all(|t| t.items == 7 && t.found == 7));
}

// Verifies: a header-only dataset is rejected before any phase runs.
#[test]
fn empty_dataset_is_an_error() {
    let data = dataset(&[]);
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig {
        log_path: dir.path().join("analysis.txt"),
        ..HarnessConfig::new(data.path(), 10)
    };
    match harness::run(&config) {
        Err(HarnessError::EmptyDataset(p)) => assert_eq!(p, data.path()),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!config.log_path.exists());
}
