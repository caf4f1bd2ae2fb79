//! CleverTap replay: feeds recorded host messages through the CleverTap
//! integration and prints every resulting SDK call as a JSON line.
//!
//! Input is one host message per line (file or stdin). Logs go to stderr.

mod settings;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clap::Parser;
use clevertap_core::sdk::recording_sdk;
use clevertap_core::{HostLogLevel, HostMessage, SdkCall};
use clevertap_integration::{CleverTapFactory, IntegrationFactory};
use tracing::{info, warn};

use crate::settings::ReplayConfig;

#[derive(Parser, Debug)]
#[command(name = "clevertap-replay")]
#[command(about = "Replay host analytics messages through the CleverTap integration")]
#[command(version)]
struct Cli {
    /// JSON-lines file of host messages (reads stdin when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// CleverTap account id (overrides config)
    #[arg(long, env = "CLEVERTAP_REPLAY__ACCOUNT_ID")]
    account_id: Option<String>,

    /// CleverTap account token (overrides config)
    #[arg(long, env = "CLEVERTAP_REPLAY__ACCOUNT_TOKEN")]
    account_token: Option<String>,

    /// Data-center region, or "none" for the default (overrides config)
    #[arg(long, env = "CLEVERTAP_REPLAY__REGION")]
    region: Option<String>,

    /// Host log level: none, error, warning, info, debug, verbose
    #[arg(long)]
    log_level: Option<HostLogLevel>,

    /// Drop nested identify traits instead of flattening address/company
    #[arg(long, default_value_t = false)]
    legacy_trait_filter: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clevertap_replay=info,clevertap_integration=info".into()
            }),
        )
        .with_writer(io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let mut settings = ReplayConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ReplayConfig::default()
    });

    if let Some(account_id) = cli.account_id {
        settings.account_id = Some(account_id);
    }
    if let Some(account_token) = cli.account_token {
        settings.account_token = Some(account_token);
    }
    if let Some(region) = cli.region {
        settings.region = Some(region);
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level.to_string();
    }
    settings.legacy_trait_filter |= cli.legacy_trait_filter;

    let destination = settings.destination();
    let host = settings.host()?;
    info!(
        has_account_id = destination.account_id.is_some(),
        region = destination.region.as_deref().unwrap_or("none"),
        log_level = %host.log_level,
        "Configuration loaded"
    );

    let sdk = recording_sdk();
    let integration = CleverTapFactory::instance().initiate(
        &serde_json::to_value(&destination)?,
        &host,
        sdk.clone(),
    );

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut calls = write_calls(&mut out, sdk.take())?;
    let mut replayed = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<HostMessage>(&line) {
            Ok(message) => {
                integration.dump(message);
                replayed += 1;
            }
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed message");
                skipped += 1;
            }
        }
        calls += write_calls(&mut out, sdk.take())?;
    }

    integration.flush();
    out.flush()?;

    info!(replayed, skipped, calls, "Replay finished");
    Ok(())
}

fn write_calls(out: &mut impl Write, calls: Vec<SdkCall>) -> anyhow::Result<usize> {
    let count = calls.len();
    for call in calls {
        serde_json::to_writer(&mut *out, &call)?;
        writeln!(out)?;
    }
    Ok(count)
}
