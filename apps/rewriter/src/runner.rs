//! Runner: one read, backup, rewrite, write cycle over the site document.
//!
//! The backup is written before any transform and is the only recovery path: the final write
//! overwrites the index in place, with no atomic rename.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::errors::RewriteError;
use crate::rewrite::{InsertOutcome, Rewriter};

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The file the text was read from (pristine copy or index).
    pub source: PathBuf,
    pub backup_path: PathBuf,
    pub output_path: PathBuf,
    pub original_bytes: usize,
    pub new_bytes: usize,
    pub insertions: Vec<(&'static str, InsertOutcome)>,
}

impl RunReport {
    /// Signed byte-size change from input to output.
    pub fn delta(&self) -> i64 {
        self.new_bytes as i64 - self.original_bytes as i64
    }

    pub fn missing_anchors(&self) -> Vec<&'static str> {
        self.insertions
            .iter()
            .filter(|(_, outcome)| *outcome == InsertOutcome::AnchorMissing)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Prefers the pristine copy over a previously rewritten index.
fn select_source(config: &Config) -> Result<&Path, RewriteError> {
    if config.pristine_path.exists() {
        return Ok(&config.pristine_path);
    }
    if config.index_path.exists() {
        return Ok(&config.index_path);
    }
    Err(RewriteError::MissingInput {
        path: config.index_path.clone(),
    })
}

fn read(path: &Path) -> Result<String, RewriteError> {
    fs::read_to_string(path).map_err(|source| RewriteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, content: &str) -> Result<(), RewriteError> {
    fs::write(path, content).map_err(|source| RewriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Executes one rewrite run with `rewriter` against the paths in `config`.
pub fn run(config: &Config, rewriter: &Rewriter) -> Result<RunReport, RewriteError> {
    let source = select_source(config)?;
    info!("Reading {}", source.display());
    let content = read(source)?;

    info!("Creating backup at {}", config.backup_path.display());
    write(&config.backup_path, &content)?;

    let rewritten = rewriter.transform(&content);

    info!("Writing modified file to {}", config.index_path.display());
    write(&config.index_path, &rewritten.text)?;

    Ok(RunReport {
        source: source.to_path_buf(),
        backup_path: config.backup_path.clone(),
        output_path: config.index_path.clone(),
        original_bytes: content.len(),
        new_bytes: rewritten.text.len(),
        insertions: rewritten.insertions,
    })
}
