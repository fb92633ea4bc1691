//! Check command handler

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use kbpack::report::{fmt_bytes, fmt_bytes_human};
use kbpack::{Config, GateOutcome};

/// Compare the existing archive against the byte budget without rebuilding.
pub fn handle(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let archive_path = config.archive_path();
    let archive_bytes = fs::metadata(&archive_path)
        .with_context(|| {
            format!(
                "No archive at {} - run 'kbpack build' first",
                archive_path.display()
            )
        })?
        .len();

    println!(
        "Archive:  {} {}",
        archive_path.display(),
        fmt_bytes_human(archive_bytes)
    );
    println!("Budget:   {}", fmt_bytes(config.budget.target_bytes));

    match GateOutcome::measure(archive_bytes, config.budget.target_bytes) {
        GateOutcome::Within { margin } => {
            println!("Within budget, {} to spare.", fmt_bytes(margin));
            Ok(())
        }
        GateOutcome::Exceeded { overage } => {
            println!("Over budget by {}.", fmt_bytes(overage));
            bail!("archive exceeds the byte budget by {} bytes", overage)
        }
    }
}
