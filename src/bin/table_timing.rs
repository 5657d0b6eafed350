use chained_table::harness::{self, HarnessConfig, DEFAULT_LOG_PATH};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "table_timing")]
#[command(about = "Time insert/search/delete of movie titles in a chained hash table", long_about = None)]
struct Cli {
    /// CSV dataset with a header line and eight columns per movie
    dataset: PathBuf,
    /// Number of records to read after the header
    lines: usize,
    /// File the per-phase CSV timing lines are appended to
    #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,
    /// Seed for the shuffled phase
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = HarnessConfig {
        log_path: cli.log,
        seed: cli.seed,
        ..HarnessConfig::new(cli.dataset, cli.lines)
    };

    match harness::run(&config) {
        Ok(timings) => {
            for t in &timings {
                println!("\n==== {} Movies ====", t.label);
                println!("Insert time: {:.6} sec", t.insert.as_secs_f64());
                println!("Search time: {:.6} sec", t.search.as_secs_f64());
                println!("Delete time: {:.6} sec", t.delete.as_secs_f64());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("table_timing: {e}");
            ExitCode::FAILURE
        }
    }
}
