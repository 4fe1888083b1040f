//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filestore - save, load and purge workflow file variables
#[derive(Parser, Debug)]
#[command(name = "filestore")]
#[command(about = "Save, load and purge workflow file variables", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a local file and print its reference JSON
    Save {
        /// File to store
        file: PathBuf,

        /// Storage definition, e.g. TEMPFOLDER or FOLDER:/srv/files (defaults to the configured one)
        #[arg(long)]
        storage: Option<String>,

        /// Name to record instead of the file name
        #[arg(long)]
        name: Option<String>,

        /// MIME type to record instead of the inferred one
        #[arg(long)]
        mime: Option<String>,
    },

    /// Resolve a reference and write its bytes to a file
    Load {
        /// Reference JSON, or @path to a file holding it
        reference: String,

        /// Where to write the bytes
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Delete the artifact a reference points to
    Purge {
        /// Reference JSON, or @path to a file holding it
        reference: String,
    },

    /// Print the redacted summary of a storage definition
    Describe {
        /// Encoded storage definition
        definition: String,
    },
}
