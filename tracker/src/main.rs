//! Fleet Tracker - Entry Point
//!
//! Answers deployment questions about the fleet from the command line:
//! what a server runs, and which servers run a given nextgen build.

use std::collections::HashMap;
use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use fleet_tracker::deployment::fleet::FleetQueries;
use fleet_tracker::deployment::resolver::DeploymentResolver;
use fleet_tracker::deployment::state::HasDeployment;
use fleet_tracker::errors::TrackerError;
use fleet_tracker::filesys::file::File;
use fleet_tracker::logs::{init_logging, LogOptions};
use fleet_tracker::storage::layout::StorageLayout;
use fleet_tracker::storage::settings::Settings;
use fleet_tracker::store::memory::MemoryServerStore;
use fleet_tracker::store::ServerStore;
use fleet_tracker::utils::{parse_timestamp, split_list, version_info};
use fleet_tracker::views::{deployment_status, server_list};

use serde::Serialize;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command line arguments
    let mut cli_args: HashMap<String, String> = HashMap::new();
    for arg in env::args().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            // Handle --key=value format
            cli_args.insert(key.trim_start_matches('-').to_string(), value.to_string());
        } else if arg.starts_with("--") {
            // Handle standalone flags like --version
            cli_args.insert(arg.trim_start_matches('-').to_string(), "true".to_string());
        }
    }

    // Print version and exit
    if cli_args.contains_key("version") {
        return print_json(&version_info());
    }

    // Retrieve the settings file
    let settings_file = match cli_args.get("config") {
        Some(path) => File::new(path),
        None => StorageLayout::default().settings_file(),
    };
    let settings = if settings_file.exists().await {
        match settings_file.read_json::<Settings>().await {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Unable to read settings file: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        Settings::default()
    };

    // Initialize logging
    let log_options = LogOptions {
        log_level: settings.log_level,
        json_format: settings.json_logs,
    };
    if let Err(e) = init_logging(&log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&cli_args, &settings).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli_args: &HashMap<String, String>, settings: &Settings) -> Result<ExitCode, TrackerError> {
    let store = Arc::new(MemoryServerStore::load(&File::new(&settings.servers_file)).await?);
    let repositories = Arc::new(settings.load_repositories().await?);
    info!(
        "Tracking {} servers against repositories {:?}",
        store.len(),
        repositories.names()
    );

    if let Some(id) = cli_args.get("server") {
        let Some(server) = store.get(id)? else {
            return Err(TrackerError::NotFound(format!("server {}", id)));
        };

        let resolver = DeploymentResolver::new(repositories);
        if let Some(revision) = resolver.deployed_application_revision(&server)? {
            info!("{} runs {} revision {:?}", server.id, server.application_package(), revision.summary);
        }
        return Ok(print_json(&deployment_status(&server, &settings.repository_base_path)));
    }

    let fleet = FleetQueries::new(repositories, store);

    if let Some(commits) = cli_args.get("commit") {
        let servers = fleet.servers_with_deployed_commit(split_list(commits))?;
        return Ok(print_json(&server_list(&servers)));
    }

    if let Some(since) = cli_args.get("since") {
        let Some(since) = parse_timestamp(since) else {
            return Err(TrackerError::ConfigError(format!("Invalid timestamp: {}", since)));
        };
        let servers = fleet.servers_deployed_since(since)?;
        return Ok(print_json(&server_list(&servers)));
    }

    eprintln!("Usage: fleet-tracker [--config=PATH] (--server=ID | --commit=SHA[,SHA...] | --since=TIME | --version)");
    Ok(ExitCode::FAILURE)
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}
