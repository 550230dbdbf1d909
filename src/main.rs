//! `osc-oapi`: inspect the OAPI catalog and check payloads offline.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use osc_oapi::{Config, Operation};

#[derive(Parser)]
#[command(name = "osc-oapi", version, about = "Outscale OAPI catalog tool")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every operation with its path and modeled error statuses
    Operations {
        #[arg(long)]
        json: bool,
    },

    /// Parse a request body and print it in canonical wire form
    Normalize {
        operation: Operation,
        /// Input file; `-` or omitted reads stdin
        file: Option<PathBuf>,
    },

    /// Classify a response body received with the given status
    Decode {
        operation: Operation,
        #[arg(long, default_value_t = 200)]
        status: u16,
        /// Input file; `-` or omitted reads stdin
        file: Option<PathBuf>,
    },

    /// Show the resolved configuration and service URL
    Config {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Operations { json } => list_operations(json),
        Command::Normalize { operation, file } => {
            let body = read_input(file.as_ref())?;
            let normalized = operation.normalize_request(&body)?;
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            Ok(())
        }
        Command::Decode {
            operation,
            status,
            file,
        } => {
            let body = read_input(file.as_ref())?;
            let response = operation.decode_response(status, &body)?;
            let (_, wire) = response.to_wire()?;
            let payload: serde_json::Value = if wire.is_empty() {
                serde_json::Value::Null
            } else {
                serde_json::from_slice(&wire)
                    .unwrap_or_else(|_| String::from_utf8_lossy(&wire).into_owned().into())
            };

            let out = serde_json::json!({
                "Variant": response.variant_name(),
                "Status": response.status_code(),
                "Body": payload,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Command::Config { profile, file } => {
            let config = Config::load(profile.as_deref(), file.as_deref())
                .context("Failed to load configuration")?;
            println!("{:#?}", config);
            println!("service url: {}", config.service_url()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "osc_oapi=info",
        1 => "osc_oapi=debug",
        _ => "osc_oapi=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn list_operations(json: bool) -> Result<()> {
    if json {
        let rows: Vec<_> = Operation::ALL
            .iter()
            .map(|op| {
                serde_json::json!({
                    "name": op.name(),
                    "path": op.path(),
                    "error_statuses": op.error_statuses().iter().map(|s| s.code()).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for op in Operation::ALL {
        let statuses: Vec<String> = op
            .error_statuses()
            .iter()
            .map(|s| s.code().to_string())
            .collect();
        println!("{:<40} {}", op.name(), statuses.join(","));
    }
    tracing::debug!(count = Operation::ALL.len(), "listed operations");
    Ok(())
}

fn read_input(file: Option<&PathBuf>) -> Result<Vec<u8>> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
