//! mcpman - terminal manager and ad-hoc HTTP caller for MCP server endpoints.
//!
//! # Architecture
//!
//! The binary wires explicit service objects together once at startup and
//! hands them to the interaction flows by reference - no globals:
//!
//! ```text
//! main() -> ServerRegistry<JsonFileStore> + ApiClient + Terminal
//!               |
//!               v
//!           Flows::{list, add, edit, delete, call, test}
//! ```
//!
//! Registry state lives in `~/.mcpman/servers.json` and is re-read on every
//! operation, so edits made to the file while the tool runs are picked up
//! immediately.

mod flows;
mod presenter;
mod report;
mod surface;

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mcpman_client::ApiClient;
use mcpman_registry::{default_settings_path, JsonFileStore, ServerRegistry};

use crate::flows::Flows;
use crate::surface::Terminal;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    // Logs go to stderr so stdout stays clean for command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn usage() {
    println!(
        "mcpman - manage MCP server endpoints and make ad-hoc API calls

Usage: mcpman <command>

Commands:
  list      Show configured servers
  add       Register a new server (interactive)
  edit      Update a configured server (interactive)
  delete    Remove a configured server (interactive)
  call      Issue an HTTP request against a server (interactive)
  test      Check whether a server is reachable
  help      Show this message

Set RUST_LOG to control logging (default: info, written to stderr)."
    );
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let command = std::env::args().nth(1).unwrap_or_else(|| "help".to_string());
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        usage();
        return Ok(ExitCode::SUCCESS);
    }

    let settings_path =
        default_settings_path().context("could not determine the home directory")?;
    tracing::debug!(path = %settings_path.display(), "Using settings file");

    let registry = ServerRegistry::new(JsonFileStore::new(settings_path));
    let client = ApiClient::new().context("failed to build the HTTP client")?;
    let terminal = Terminal;
    let flows = Flows::new(&registry, &client, &terminal, &terminal);

    match command.as_str() {
        "list" => flows.list(),
        "add" => flows.add(),
        "edit" => flows.edit(),
        "delete" => flows.delete(),
        "call" => flows.call().await,
        "test" => flows.test().await,
        other => {
            eprintln!("mcpman: unknown command: {other}\n");
            usage();
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}
