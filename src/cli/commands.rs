//! CLI command implementations
//!
//! `init` prepares the data directory, `serve` runs the HTTP service and
//! `list` / `history` read the documents once and exit.

use std::fs;
use std::future::Future;
use std::path::Path;

use serde_json::json;

use crate::http_server::HttpServer;
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::records::resolve_limit;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
        Command::List { config, limit } => list(&config, limit),
        Command::History { config } => history(&config),
    }
}

/// Create the data directory with empty student and evaluation documents.
///
/// Refuses to touch a directory that already holds a student document.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;

    if is_initialized(&config) {
        return Err(CliError::already_initialized());
    }

    let data_dir = config.data_path();
    fs::create_dir_all(data_dir).map_err(|e| {
        CliError::config_error(format!("Failed to create directory {:?}: {}", data_dir, e))
    })?;

    for path in [config.students_path(), config.evaluation_log_path()] {
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
    }

    log_event_with_fields(Event::Initialized, &[("data_dir", &config.data_dir)]);
    write_response(&json!({"initialized": true}))?;

    Ok(())
}

/// Run the HTTP service on a multi-threaded Tokio runtime
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path)?;
    if !is_initialized(&config) {
        return Err(CliError::not_initialized());
    }
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("data_dir", &config.data_dir),
            ("evaluation_delay_ms", &config.evaluation_delay_ms.to_string()),
        ],
    );

    let mut http_config = config.http();
    if let Some(port) = port {
        http_config.port = port;
    }
    let state = config.classroom_state();

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async move {
        // The server and its spawned evaluations must live inside the runtime
        let server = HttpServer::with_config(http_config, state);
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print students, highest score first
pub fn list(config_path: &Path, limit: Option<usize>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    if !is_initialized(&config) {
        return Err(CliError::not_initialized());
    }
    let limit = resolve_limit(limit)?;
    let state = config.classroom_state();

    let mut students = block_on(async move { state.students.list().await })??;
    students.truncate(limit);

    write_response(&students)
}

/// Print the evaluation log, oldest first
pub fn history(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    if !is_initialized(&config) {
        return Err(CliError::not_initialized());
    }
    let state = config.classroom_state();

    let entries = block_on(async move { state.evaluations.read_all().await })??;

    write_response(&entries)
}

fn block_on<F: Future>(future: F) -> CliResult<F::Output> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;
    Ok(rt.block_on(future))
}

fn is_initialized(config: &Config) -> bool {
    config.students_path().exists()
}
