// Operator tool for the MATS result cache.
// Inspects deployment version info and manages the on-disk cache file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use mats_cache::{Result, ServerConfig, ServerContext, VersionInfo};

#[derive(Parser)]
#[command(name = "mats-cache", about = "Inspect and manage the MATS result cache")]
struct Cli {
    /// Cache file to operate on (defaults to ./fileCache)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print deployment version info as JSON
    Version,
    /// Print a cached result as JSON
    Get { key: String },
    /// Expire a single cached result
    Expire { key: String },
    /// Remove every cached result
    Clear,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let command = match cli.command {
        Command::Version => {
            // Raw environment values, without local defaults
            println!("{}", serde_json::to_string_pretty(&VersionInfo::from_env())?);
            return Ok(ExitCode::SUCCESS);
        }
        command => command,
    };

    let mut config = ServerConfig::from_env();
    if let Some(file) = cli.file {
        config.cache.file = file;
    }
    let mut context = ServerContext::init(config)?;

    match command {
        Command::Get { key } => match context.cache().get_result::<Value>(&key)? {
            Some(result) => println!("{}", serde_json::to_string_pretty(&result)?),
            None => {
                eprintln!("no cached result for {key}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Expire { key } => context.cache_mut().expire_key(&key)?,
        Command::Clear => context.cache_mut().clear()?,
        Command::Version => {}
    }

    Ok(ExitCode::SUCCESS)
}
