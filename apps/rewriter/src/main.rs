mod config;
mod errors;
mod rewrite;
mod runner;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::rewrite::{InsertOutcome, Rewriter};

fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("site_rewriter={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Site rewriter v{}", env!("CARGO_PKG_VERSION"));

    let rewriter = Rewriter::standard().context("Failed to compile font rules")?;
    let report = runner::run(&config, &rewriter)
        .with_context(|| format!("Rewrite of {} failed", config.index_path.display()))?;

    info!("Read from {}", report.source.display());
    for (name, outcome) in &report.insertions {
        match outcome {
            InsertOutcome::Inserted(count) => info!("{name}: {count} insertion(s)"),
            InsertOutcome::AlreadyPresent => info!("{name}: already in place"),
            InsertOutcome::AnchorMissing => {}
        }
    }
    let missing = report.missing_anchors();
    if !missing.is_empty() {
        warn!("Not inserted: {}; review the output manually", missing.join(", "));
    }

    info!("Complete!");
    info!("Original size: {} bytes", report.original_bytes);
    info!("New size:      {} bytes", report.new_bytes);
    info!("Difference:    {:+} bytes", report.delta());
    info!("Backup saved to: {}", report.backup_path.display());
    info!(
        "Next steps: review {}, serve it locally (e.g. `python3 -m http.server` in its directory), then commit and deploy",
        report.output_path.display()
    );

    Ok(())
}
