use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions of a rewrite run.
/// A missing insertion anchor is not here: it is a warning, never an error.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Input document not found: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}
