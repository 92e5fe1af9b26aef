//! CLI argument definitions using clap
//!
//! Commands:
//! - classroom init --config <path>
//! - classroom serve --config <path> [--port <port>]
//! - classroom list --config <path> [--limit <n>]
//! - classroom history --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// classroom - student records with delayed background evaluations
#[derive(Parser, Debug)]
#[command(name = "classroom")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and empty documents
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./classroom.json")]
        config: PathBuf,
    },

    /// Run the HTTP service
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./classroom.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print students, highest score first
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./classroom.json")]
        config: PathBuf,

        /// Maximum number of students to print (1-1000)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print the evaluation log
    History {
        /// Path to configuration file
        #[arg(long, default_value = "./classroom.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
