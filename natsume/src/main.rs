//! natsume-panel - operator CLI for the Natsume binding service

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use natsume::{ClientConfig, Panel, render};

/// natsume-panel - inspect and manage device bindings
#[derive(Parser, Debug)]
#[command(name = "natsume-panel")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.natsume/panel.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Service address, overrides the config file
    #[arg(short, long, global = true, env = "NATSUME_SERVER")]
    server: Option<String>,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store the panel token
    Login {
        /// Panel token issued by the service operator
        #[arg(env = "NATSUME_PANEL_TOKEN", hide_env_values = true)]
        token: String,
    },

    /// Forget the stored panel token
    Logout,

    /// Show binding and sync status
    Status {
        /// Only list devices whose info is not synced
        #[arg(long)]
        unsynced: bool,

        /// Print the validated snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the binding of a device
    Unbind {
        /// MAC address of the device
        mac: String,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let path = cli.config.clone().unwrap_or_else(ClientConfig::default_path);
    let config = ClientConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    match &cli.server {
        Some(server) => Ok(config.with_server(server).validated()?),
        None => Ok(config),
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let panel = Panel::from_config(&config)?;

    match cli.command {
        Commands::Login { token } => {
            panel.login(token)?;
            println!("Logged in to {}", panel.server());
        }
        Commands::Logout => {
            panel.logout()?;
            println!("Logged out");
        }
        Commands::Status { unsynced, json } => {
            let status = panel.status().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print!("{}", render::status_table(&status, unsynced));
            }
        }
        Commands::Unbind { mac } => {
            panel.remove_binding(&mac).await?;
            println!("Binding of {} removed", mac.trim());
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<natsume::Error>() {
                Some(panel_err) => eprintln!("error: {}", panel_err.user_message()),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
