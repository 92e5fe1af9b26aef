//! CLI module for the classroom service
//!
//! Provides command-line interface for:
//! - init: Create the data directory
//! - serve: Run the HTTP service
//! - list: Print students once
//! - history: Print the evaluation log once

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{history, init, list, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
