#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use tracing_subscriber::prelude::*;

use jitsidash::app::config::DashboardConfig;

const USAGE: &str = "Usage: jitsidash <config.toml|config.yaml> [output.json|output.yaml]";

fn init_logging() {
    // RUST_LOG overrides the default filter
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jitsidash=info"));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A tracing subscriber is already installed");
        return;
    }

    // Bridge log crate records (log_* macros) to tracing.
    // This must be done AFTER setting the tracing subscriber
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }
}

fn run(args: &[String]) -> Result<()> {
    let (config_path, output_path) = match args {
        [config] => (PathBuf::from(config), None),
        [config, output] => (PathBuf::from(config), Some(PathBuf::from(output))),
        _ => bail!("{}", USAGE),
    };

    let config = DashboardConfig::from_file(&config_path)?;
    let stack = config.build()?;
    let template = stack.synth()?;

    match output_path {
        Some(path) => {
            template.to_file(&path)?;
            jitsidash::log_info!("Template for stack '{}' written to {}", stack.name(), path.display());
        }
        None => println!("{}", template.to_json_string()?),
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
