//! stroke2font - Incremental icon font builder
//!
//! CLI entry point.

use clap::{CommandFactory, Parser};
use console::style;
use std::process::ExitCode;
use stroke2font::cli::{Cli, LogFormat};
use stroke2font::config::ConfigManager;
use stroke2font::error::{StrokeError, StrokeResult};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit 1 like any other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> StrokeResult<()> {
    // 0 = warn (status lines only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("stroke2font=warn"),
        1 => EnvFilter::new("stroke2font=info"),
        _ => EnvFilter::new("stroke2font=debug"),
    };

    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }

    stroke2font::ui::init_theme();

    let cwd = std::env::current_dir().map_err(|e| StrokeError::io("getting current directory", e))?;

    let config_path = if let Some(ref path) = cli.config {
        Some(cwd.join(path))
    } else if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    if config_path.is_none() && !cli.has_required_flags() {
        Cli::command()
            .print_help()
            .map_err(|e| StrokeError::io("printing help", e))?;
        return Ok(());
    }

    stroke2font::cli::commands::build(&cli, config_path, &cwd).await
}
