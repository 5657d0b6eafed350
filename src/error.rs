use std::io;
use std::path::PathBuf;

/// Failures of the timing harness. The table itself has no error cases.
#[derive(thiserror::Error, Debug)]
pub enum HarnessError {
    #[error("[Dataset] cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("[Dataset] {} has no movie records", .0.display())]
    EmptyDataset(PathBuf),
    #[error("[Log] cannot append to {}: {source}", path.display())]
    Append { path: PathBuf, source: io::Error },
}
