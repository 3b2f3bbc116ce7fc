//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use quill_core::config::{self, Config};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "quill")]
#[command(version)]
#[command(about = "Terminal client for the blog API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                println!("{}", config::paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Init => {
                let path = Config::init().context("init config")?;
                println!("Created config at {}", path.display());
                Ok(())
            }
        },
        None => {
            let mut config = Config::load().context("load config")?;
            if let Some(url) = cli.api_url.as_deref() {
                config.api_base_url = url.trim_end_matches('/').to_string();
            }

            // Logs go to a file; stdout belongs to the TUI.
            let _log_guard = init_logging()?;

            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(async move { tokio::task::block_in_place(|| quill_tui::run(config)) })
        }
    }
}

/// Routes tracing output to a daily-rotated file under the Quill home.
/// QUILL_LOG controls the filter (default: warn).
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create log dir {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "quill.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = std::env::var("QUILL_LOG")
        .ok()
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .init();

    Ok(guard)
}
