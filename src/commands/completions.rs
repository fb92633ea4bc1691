//! Completions command handler

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};
use std::io;

use kbpack::cli::Cli;

/// Generate a shell completion script on stdout.
pub fn handle(shell: CompletionShell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kbpack", &mut io::stdout());
    Ok(())
}
