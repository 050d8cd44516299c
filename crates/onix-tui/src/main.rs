//! Onix Terminal UI.
//!
//! Terminal dashboard for the applications managed by an Onix backend.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use onix_client::{ClientConfig, OnixApi, OnixClient, DEFAULT_ENDPOINT};
use onix_core::{App as OnixApp, AppId};

mod app;
mod backend;
mod config;
mod controls;
mod event;
mod notifications;
mod state;
mod ui;

use app::App;
use config::{DashboardConfig, DEFAULT_LOG_FILE};
use controls::offered_actions;
use event::{BackendCommand, UiEvent};

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "onix_tui=debug,onix_client=debug";

#[derive(Parser)]
#[command(name = "onix-tui")]
#[command(about = "Onix Terminal UI")]
#[command(version)]
struct Cli {
    /// Onix backend endpoint
    #[arg(short, long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// File the dashboard writes its logs to
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard - browse applications and run their actions
    #[command(alias = "d")]
    Dashboard {
        /// Refresh interval in seconds
        #[arg(short, long, default_value = "3", value_parser = clap::value_parser!(u64).range(1..))]
        refresh: u64,
    },

    /// Print applications with their status and offered actions, then exit
    List {
        /// Show the details of one application
        #[arg(short, long)]
        app: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = DashboardConfig {
        client: ClientConfig::new(cli.endpoint).with_timeout(Duration::from_secs(cli.timeout)),
        log_file: cli.log_file,
        ..DashboardConfig::default()
    };

    match cli.command {
        Commands::Dashboard { refresh } => {
            let config = DashboardConfig {
                refresh: Duration::from_secs(refresh),
                ..config
            };
            // Write to file to avoid terminal interference
            if let Ok(file) = std::fs::File::create(&config.log_file) {
                tracing_subscriber::fmt()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_env_filter(env_filter())
                    .with_ansi(false)
                    .init();
            }
            run_dashboard(config)?;
        }
        Commands::List { app } => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter())
                .init();
            run_list(&config, app.as_deref())?;
        }
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn run_dashboard(config: DashboardConfig) -> Result<(), Box<dyn Error>> {
    info!(
        endpoint = %config.client.endpoint,
        refresh = ?config.refresh,
        "Starting dashboard"
    );

    let client: Arc<dyn OnixApi> = Arc::new(OnixClient::new(&config.client)?);

    // Create channels for UI <-> backend communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(100);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(100);

    // Background thread with its own tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    let refresh = config.refresh;
    let bg_handle = std::thread::spawn(move || {
        rt.block_on(backend::run_backend(client, refresh, ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    // Run UI loop on main thread
    let mut app = App::new(ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    // Wait for background thread to finish
    let _ = bg_handle.join();

    info!("Dashboard shutdown complete");

    result.map_err(|e| e.into())
}

fn run_list(config: &DashboardConfig, app: Option<&str>) -> Result<(), Box<dyn Error>> {
    let client = OnixClient::new(&config.client)?;
    let rt = tokio::runtime::Runtime::new()?;

    match app {
        Some(raw) => {
            let id = AppId::parse(raw)?;
            let app = rt.block_on(client.get_app(&id))?;
            print_app_details(&app);
        }
        None => {
            let apps = rt.block_on(client.list_apps())?;
            if apps.is_empty() {
                println!("No applications.");
            }
            for app in &apps {
                println!(
                    "{:<24} {:<18} {:<16} {}",
                    app.id.as_str(),
                    app.name,
                    app.status.label(),
                    actions_summary(app)
                );
            }
        }
    }

    Ok(())
}

fn actions_summary(app: &OnixApp) -> String {
    offered_actions(app.status)
        .into_iter()
        .map(|kind| kind.descriptor().label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_app_details(app: &OnixApp) {
    println!("{} ({})", app.name, app.id);
    println!("  status:  {}", app.status.label());
    println!("  actions: {}", actions_summary(app));

    for container in &app.containers {
        println!("  container {} [{}]", container.name, container.status_label());
        println!("    image: {}", container.image);
        for binding in &container.port_bindings {
            println!("    port:  {binding}");
        }
        for volume in &container.volumes {
            let row = volume.row();
            println!(
                "    volume: {} ({}) {}",
                row.name,
                row.kind,
                row.container_path.unwrap_or("-")
            );
        }
        for env in &container.env_vars {
            println!("    env:   {}={}", env.name, env.value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_refresh_is_rejected() {
        assert!(Cli::try_parse_from(["onix-tui", "dashboard", "--refresh", "0"]).is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["onix-tui", "--timeout", "0", "list"]).is_err());
        assert!(Cli::try_parse_from(["onix-tui", "dashboard", "--timeout", "0"]).is_err());
    }

    #[test]
    fn test_positive_intervals_parse() {
        let cli = Cli::try_parse_from(["onix-tui", "--timeout", "5", "dashboard", "-r", "1"])
            .expect("valid arguments");
        assert_eq!(cli.timeout, 5);
        assert!(matches!(cli.command, Commands::Dashboard { refresh: 1 }));
    }
}
