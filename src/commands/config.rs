//! Config subcommands handler

use anyhow::{bail, Context, Result};
use std::path::Path;

use kbpack::Config;

/// Write a default kbpack.toml. Refuses to overwrite an existing file.
pub fn handle_init(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }
    Config::default().save(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

/// Show the effective configuration as TOML.
///
/// Missing fields are filled with defaults, so the output is the exact
/// configuration a build would run with.
pub fn handle_show(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    print!("{}", toml_str);
    Ok(())
}

/// Open the configuration file in the default editor.
///
/// Uses the $EDITOR environment variable (defaults to 'vi').
pub fn handle_edit(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        Config::default().save(config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!("Opening {} with {}", config_path.display(), editor);

    std::process::Command::new(&editor)
        .arg(config_path)
        .status()
        .with_context(|| format!("Failed to open editor: {}", editor))?;
    Ok(())
}
