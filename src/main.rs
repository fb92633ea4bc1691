//! kbpack - CLI entry point

use anyhow::Result;
use clap::Parser;

use kbpack::cli::{Cli, Commands, ConfigCommands, SubsCommands};

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Build { config, json } => commands::build::handle(&config, json),
        Commands::Check { config } => commands::check::handle(&config),
        Commands::Subs(cmd) => match cmd {
            SubsCommands::List { config } => commands::subs::handle_list(&config),
            SubsCommands::Check { config } => commands::subs::handle_check(&config),
            SubsCommands::Add {
                pattern,
                replacement,
                config,
            } => commands::subs::handle_add(&config, &pattern, &replacement),
            SubsCommands::Remove { pattern, config } => {
                commands::subs::handle_remove(&config, &pattern)
            }
        },
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Init { config } => commands::config::handle_init(&config),
            ConfigCommands::Show { config } => commands::config::handle_show(&config),
            ConfigCommands::Edit { config } => commands::config::handle_edit(&config),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
