// BuildSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. The scan run and exit-code mapping

use buildsleuth::app;
use buildsleuth::platform;
use buildsleuth::util;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// BuildSleuth - extract error context from a build log.
///
/// Prints every line containing FAILED, Error, or "What went wrong" with the
/// lines that follow it. If none is present, prints the end of the file.
#[derive(Parser, Debug)]
#[command(name = "buildsleuth", version, about)]
struct Cli {
    /// Log file to scan [default: android/build_error_10.2.0.log].
    path: Option<PathBuf>,

    /// Lines printed after each matching line [default: 24].
    #[arg(short = 'n', long = "context-lines", value_parser = parse_context_lines)]
    context_lines: Option<usize>,

    /// Characters printed from the end of the file when nothing matches [default: 2000].
    #[arg(short = 't', long = "tail-chars", value_parser = parse_tail_chars)]
    tail_chars: Option<usize>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn parse_context_lines(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    platform::config::validate_context_lines(n).map_err(|e| e.to_string())
}

fn parse_tail_chars(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{e}"))?;
    platform::config::validate_tail_chars(n).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config first: its [logging] level feeds the subscriber.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (config, config_problems) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "BuildSleuth starting"
    );

    for problem in &config_problems {
        tracing::warn!(error = %problem, "Config problem; using default");
    }

    // CLI > config.toml > built-in defaults.
    let mut options = config.scan;
    if let Some(n) = cli.context_lines {
        options.context_lines = n;
    }
    if let Some(n) = cli.tail_chars {
        options.tail_chars = n;
    }

    let path = app::scan::resolve_input_path(cli.path);
    let stdout = std::io::stdout().lock();

    match app::scan::run_scan(&path, &options, stdout) {
        Ok(outcome) => {
            tracing::info!(
                encoding = %outcome.encoding,
                windows = outcome.windows,
                chars = outcome.total_chars,
                "Scan complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Scan failed");
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
