//! CLI definitions for kbpack
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so they can be accessed by xtask for documentation generation.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Build clap styles for consistent CLI appearance.
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "kbpack")]
#[command(about = "[ kbpack ] - pack a single-file web demo into a size-budgeted zip")]
#[command(
    long_about = "kbpack - build size-budgeted single-file web demos.

kbpack takes a page with one inline <script> and one inline <style> block,
runs your linter and minifiers over the extracted pieces, squeezes the
markup, applies a literal substitution table, and packs the result into a
single-entry zip that must fit under a byte budget (13,312 bytes by
default, the js13k-style competition limit).

QUICK START:
    kbpack config init             Write a default kbpack.toml
    kbpack build                   Run the full pipeline
    kbpack check                   Re-check the archive against the budget
    kbpack subs list               Show the substitution table

Configuration lives in ./kbpack.toml; every field has a working default."
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Enable debug diagnostics
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full build pipeline
    #[command(long_about = "Run the full build pipeline.

Extracts the inline script and style from the input page, lints the script
(persisting any fixes back into the page), minifies both pieces with the
configured tools, collapses the markup whitespace, applies the substitution
table, writes the distributable page, archives it, and checks the archive
size against the byte budget.

Exits non-zero if any stage fails or the archive exceeds the budget.

EXAMPLES:
    kbpack build                       Build with ./kbpack.toml
    kbpack build --config demo.toml    Build with another config
    kbpack build --json                Emit the report as JSON")]
    Build {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
        /// Print the build report as JSON instead of the stage narration
        #[arg(long)]
        json: bool,
    },

    /// Check an existing archive against the byte budget
    #[command(long_about = "Check an existing archive against the byte budget.

Stats the configured archive file and reports the margin (or overage)
without rebuilding anything. Exits non-zero when the archive exceeds the
budget or does not exist.

EXAMPLE:
    kbpack check")]
    Check {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },

    /// Manage the substitution table
    #[command(
        subcommand,
        long_about = "Inspect and edit the [substitutions] table in kbpack.toml.

Substitutions are literal pattern -> replacement rules applied to the final
markup, longest pattern first. Replacement values must be unique across the
table; add/remove re-validate before writing and preserve the config file's
formatting and comments.

EXAMPLES:
    kbpack subs list                  Show rules in application order
    kbpack subs check                 Validate the table
    kbpack subs add toolbar t         Map 'toolbar' to 't'
    kbpack subs remove toolbar        Drop the 'toolbar' rule"
    )]
    Subs(SubsCommands),

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the kbpack configuration file.

Configuration is stored in ./kbpack.toml and covers the input page, working
directories, tool command lines, the byte budget, and the substitution
table.

EXAMPLES:
    kbpack config init       Write a default kbpack.toml
    kbpack config show       Display the effective configuration
    kbpack config edit       Open the config in $EDITOR"
    )]
    Config(ConfigCommands),

    /// Generate shell completions (internal use)
    #[command(hide = true)]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum SubsCommands {
    /// List rules in application order (longest pattern first)
    List {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
    /// Validate the table without building
    Check {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
    /// Add or update a rule
    Add {
        /// Literal pattern to replace
        pattern: String,
        /// Replacement text (must be unique across the table)
        replacement: String,
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
    /// Remove a rule by pattern
    Remove {
        /// Pattern of the rule to remove
        pattern: String,
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default kbpack.toml (refuses to overwrite)
    Init {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
    /// Show the effective configuration as TOML
    Show {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
    /// Open the configuration file in your default editor
    Edit {
        /// Path to the config file
        #[arg(long, short, default_value = "kbpack.toml")]
        config: PathBuf,
    },
}
