use anyhow::{Context, Result};
use bluefin_releases::{config, data, tui};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bluefin-releases")]
#[command(about = "Keyboard-driven terminal browser for Bluefin app releases")]
#[command(version)]
struct Args {
    /// Path to the apps.json catalog (overrides the config file)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Don't reload when the catalog file changes
    #[arg(long)]
    no_watch: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a JSON summary of the catalog and exit
    Stats,
}

fn env_filter() -> Result<EnvFilter> {
    Ok(EnvFilter::from_default_env().add_directive("bluefin_releases=info".parse()?))
}

/// Log to a file in the state directory; the TUI owns the terminal.
fn init_file_logging() -> Result<()> {
    let path = config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter()?)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.init {
        let path = config::init(args.config.as_deref())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    if let Some(Command::Stats) = &args.command {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter()?)
            .with_writer(std::io::stderr)
            .init();
    } else {
        init_file_logging()?;
    }

    let mut config = config::load(args.config.as_deref())?;
    if let Some(path) = args.data {
        config.data.path = path;
    }
    if args.no_watch {
        config.data.watch = false;
    }

    let data_path = config.data.path.clone();
    let catalog = data::load_catalog(&data_path)?;

    if let Some(Command::Stats) = args.command {
        println!("{}", serde_json::to_string_pretty(&catalog.summary())?);
        return Ok(());
    }

    tui::run(config, catalog, data_path).await
}
