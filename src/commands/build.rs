//! Build command handler

use anyhow::{bail, Result};
use std::path::Path;

use kbpack::{Config, GateOutcome, Pipeline};

/// Run the full build pipeline.
///
/// Prints the stage narration (or the report as JSON) and exits non-zero
/// when a stage fails or the archive exceeds the byte budget.
pub fn handle(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    let report = Pipeline::new(config).quiet(json).run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let GateOutcome::Exceeded { overage } = report.outcome {
        bail!("archive exceeds the byte budget by {} bytes", overage);
    }
    Ok(())
}
