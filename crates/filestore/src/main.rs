//! Filestore CLI binary.
//!
//! Saves local files into any configured storage, loads them back from
//! references, purges them, and describes storage definitions.

use clap::Parser;
use filestore::FilestoreConfig;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, describe_definition, load_file, purge_file, save_file};

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = FilestoreConfig::load_with(cli.config.as_deref())?;

    match cli.command {
        Commands::Save {
            file,
            storage,
            name,
            mime,
        } => {
            save_file(&config, &file, storage.as_deref(), name, mime)?;
        }

        Commands::Load { reference, output } => {
            load_file(&config, &reference, &output)?;
        }

        Commands::Purge { reference } => {
            purge_file(&config, &reference)?;
        }

        Commands::Describe { definition } => {
            describe_definition(&definition)?;
        }
    }

    Ok(())
}
