#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod normalize;

use std::io::{self, BufWriter, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Cli, log_config};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "flexjson_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "flexjson_cli::config";
pub const TRACING_TARGET_NORMALIZE: &str = "flexjson_cli::normalize";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %format!("{error:#}"),
            "normalization failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;
    log_startup_info();
    log_config(&cli);

    let codec = flexjson_core::init(cli.codec);
    let reader = cli.input.open()?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let count = normalize::normalize(codec, cli.input.kind, cli.input.lines, reader, &mut writer)?;
    writer.flush().context("failed to flush output")?;

    tracing::info!(
        target: TRACING_TARGET_NORMALIZE,
        documents = count,
        input = %cli.input.display_name(),
        "normalization finished"
    );

    Ok(())
}

/// Initializes tracing with environment-based filtering.
///
/// Logs go to stderr; stdout carries the normalized documents.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init()
        .context("failed to initialize tracing")
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting flexjson"
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        features = ?enabled_features(),
        "build information"
    );
}

/// Returns a list of enabled compile-time features of this binary.
fn enabled_features() -> Vec<&'static str> {
    [
        cfg!(feature = "schema").then_some("schema"),
    ]
    .into_iter()
    .flatten()
    .collect()
}
