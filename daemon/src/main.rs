//! Housing quality registry daemon: creates and inspects a registry on disk.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use hqa_node::{init_logging, NodeConfig, RegistryService};
use hqa_types::SystemClock;

#[derive(Parser)]
#[command(name = "hqa-daemon", about = "Housing quality assessment registry")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Data directory holding the registry snapshot.
    #[arg(long, env = "HQA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "HQA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Create a fresh registry owned by `--owner`.
    Init {
        #[arg(long, env = "HQA_OWNER")]
        owner: String,
    },
    /// Print a summary of the existing registry as JSON.
    Status,
}

fn load_config(cli: &Cli) -> anyhow::Result<NodeConfig> {
    let mut config = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)?,
        None => NodeConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    if let Command::Init { owner } = &cli.command {
        config.owner = owner.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(config.parsed_log_format()?, &config.log_level)?;

    let path = config.snapshot_path();
    match cli.command {
        Command::Init { owner } => {
            if path.exists() {
                bail!("registry snapshot already exists at {}", path.display());
            }
            let service = RegistryService::open(&config, Arc::new(SystemClock))
                .with_context(|| format!("creating registry for owner {owner}"))?;
            tracing::info!(
                owner = %service.owner().await,
                path = %path.display(),
                "registry initialised"
            );
        }
        Command::Status => {
            if !path.exists() {
                bail!(
                    "no registry snapshot at {} (run `hqa-daemon init --owner <ID>` first)",
                    path.display()
                );
            }
            let service = RegistryService::open(&config, Arc::new(SystemClock))?;
            let summary = service.summary().await;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
