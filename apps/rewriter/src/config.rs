use std::path::{Path, PathBuf};

const DEFAULT_DOCS_DIR: &str = "docs";
const INDEX_FILE: &str = "index.html";
const PRISTINE_FILE: &str = "index.html.original";
const BACKUP_FILE: &str = "index.html.backup";

/// Where the rewriter reads from and writes to.
/// The document layout is fixed; only the log level comes from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target document, overwritten with the rewritten text.
    pub index_path: PathBuf,
    /// Pristine copy, read in preference to `index_path` when it exists.
    pub pristine_path: PathBuf,
    /// Receives an exact copy of the pre-transform text on every run.
    pub backup_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Config {
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ..Config::for_docs_dir(DEFAULT_DOCS_DIR)
        }
    }

    /// Builds the standard `index.html` / `.original` / `.backup` layout under `dir`.
    pub fn for_docs_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Config {
            index_path: dir.join(INDEX_FILE),
            pristine_path: dir.join(PRISTINE_FILE),
            backup_path: dir.join(BACKUP_FILE),
            rust_log: "info".to_string(),
        }
    }
}
