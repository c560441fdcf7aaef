//! Command-line replay of recorded gesture scripts.
//!
//! Feeds a script of touches through a swipe navigator and a pull-to-refresh
//! controller and prints the frame-by-frame report as JSON on stdout. Logs go
//! to stderr, so the report can be piped.
//!
//! # Usage
//!
//! ```text
//! touchflow-replay gestures.json
//! touchflow-replay --config tuning.toml --trace-level touchflow=debug gestures.toml
//! ```
//!
//! # Configuration Resolution
//!
//! 1. `--config <PATH>` if given (errors are fatal)
//! 2. `<platform config dir>/touchflow/config.toml` if it exists
//! 3. Built-in defaults

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use touchflow::infrastructure::{default_config_file, expand_tilde};
use touchflow::observability::init_tracing;
use touchflow::replay::{self, Script};
use touchflow::{Config, Result};

/// Replay touch gesture scripts against the touchflow controllers
#[derive(Parser, Debug)]
#[command(name = "touchflow-replay", version)]
struct Args {
    /// Script file (`.toml` for TOML, anything else is read as JSON)
    script: String,

    /// Tuning configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Tracing filter directive, overriding the configuration file
    #[arg(short, long)]
    trace_level: Option<String>,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "replay failed");
            eprintln!("touchflow-replay: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(level) = &args.trace_level {
        config.trace_level = Some(level.clone());
    }
    init_tracing(&config);

    let script_path = expand_tilde(&args.script);
    let script = Script::from_file(&script_path)?;
    let report = replay::run(&script, &config)?;

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}

fn load_config(explicit: Option<&str>) -> Result<Config> {
    let path: Option<PathBuf> = match explicit {
        Some(path) => Some(expand_tilde(path)),
        None => default_config_file(),
    };

    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}
