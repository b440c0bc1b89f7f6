// # do-dyn-dns
//
// Scheduled agent that keeps a DigitalOcean DNS zone's apex (`@`) and
// wildcard (`*`) address records pointed at this machine's current public
// IP address(es). Designed to run from cron; each invocation is one
// complete reconciliation run and all carry-over state lives in the state
// file.
//
// This binary is a thin integration layer: flag parsing, interactive
// setup, tracing init, and wiring. All reconciliation and synchronization
// logic lives in dyndns-core.
//
// ## Usage
//
// ```bash
// do-dyn-dns             # one reconciliation run
// do-dyn-dns --config    # (re)run interactive setup
// do-dyn-dns --domain example.org   # one-run zone override, not persisted
// do-dyn-dns --force     # sync even if the addresses haven't changed
// ```
//
// ## Configuration
//
// State and configuration live in `do-dyn-dns.json` in the per-user config
// directory. `DO_DYN_DNS_LOG_LEVEL` controls log verbosity (default
// `info`).

mod setup;

use anyhow::Result;
use clap::Parser;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use dyndns_core::traits::{AddressOracle, StateStore, ZoneApi};
use dyndns_core::{FileStateStore, ObservedAddresses, SyncState, ZoneSynchronizer, evaluate};
use dyndns_oracle_http::HttpAddressOracle;
use dyndns_provider_digitalocean::DigitalOceanApi;

/// State file name within the per-user config directory
const STATE_FILE_NAME: &str = "do-dyn-dns.json";

/// Command line interface
#[derive(Debug, Parser)]
#[command(
    name = "do-dyn-dns",
    version,
    about = "Keep a DigitalOcean DNS zone pointed at this machine's public IP"
)]
struct Cli {
    /// (Re)configure the DigitalOcean access token and zone
    #[arg(long)]
    config: bool,

    /// Use this zone instead of the configured one, for this run only
    #[arg(long, value_name = "name")]
    domain: Option<String>,

    /// Update the DNS even if the IP addresses haven't changed
    #[arg(long)]
    force: bool,
}

/// Exit codes for different termination scenarios
///
/// - 0: clean run (changed or unchanged)
/// - 1: configuration error
/// - 2: runtime error (oracle, zone API, or persistence failure)
#[derive(Debug, Clone, Copy)]
enum AppExitCode {
    Clean = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<AppExitCode> for ExitCode {
    fn from(code: AppExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Configuration toggles for one run, taken from the command line
struct RunOptions {
    force: bool,
    domain_override: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match env::var("DO_DYN_DNS_LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", e);
        return AppExitCode::ConfigError.into();
    }

    let state_path = match state_file_path() {
        Ok(path) => path,
        Err(e) => {
            error!("{:#}", e);
            return AppExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("failed to create tokio runtime: {}", e);
            return AppExitCode::RuntimeError.into();
        }
    };

    let store = FileStateStore::new(state_path);
    match rt.block_on(run(&cli, &store)) {
        Ok(()) => AppExitCode::Clean.into(),
        Err(e) => {
            error!("{:#}", e);
            exit_code_for(&e).into()
        }
    }
}

/// Location of the state file: `<config dir>/do-dyn-dns.json`
fn state_file_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("could not determine the per-user config directory"))?;
    Ok(dir.join(STATE_FILE_NAME))
}

/// Map a failed run to an exit code
fn exit_code_for(err: &anyhow::Error) -> AppExitCode {
    match err.downcast_ref::<dyndns_core::Error>() {
        Some(dyndns_core::Error::Config(_)) => AppExitCode::ConfigError,
        _ => AppExitCode::RuntimeError,
    }
}

/// Load configuration (running setup if needed) and perform one run
async fn run(cli: &Cli, store: &FileStateStore) -> Result<()> {
    if cli.config {
        setup::interactive(store).await?;
    }

    let mut state = store.load().await?;

    // First run without a token drops into setup instead of failing.
    if state.access_token.is_empty() {
        info!("no access token configured, entering setup");
        setup::interactive(store).await?;
        state = store.load().await?;
    }
    if state.access_token.is_empty() {
        return Err(dyndns_core::Error::config("no DigitalOcean access token configured").into());
    }

    let oracle = HttpAddressOracle::new();
    let zone_api = DigitalOceanApi::new(state.access_token.clone())?;
    let opts = RunOptions {
        force: cli.force,
        domain_override: cli.domain.clone(),
    };

    run_once(&opts, state, store, &oracle, &zone_api).await
}

/// One complete reconciliation run
///
/// Observe, evaluate, synchronize if needed, then persist the observed
/// addresses with a fresh timestamp. On any failure before the final save,
/// local state is NOT advanced, so the next scheduled run retries the full
/// reconciliation.
async fn run_once(
    opts: &RunOptions,
    mut state: SyncState,
    store: &dyn StateStore,
    oracle: &dyn AddressOracle,
    zone_api: &dyn ZoneApi,
) -> Result<()> {
    let zone = opts
        .domain_override
        .clone()
        .unwrap_or_else(|| state.domain.clone());
    if zone.is_empty() {
        return Err(
            dyndns_core::Error::config("no zone configured; run with --config to set one").into(),
        );
    }

    if !state.last_run.is_empty() {
        info!("last run: {}", state.last_run);
    }

    let mut observed = ObservedAddresses::default();
    for family in state.record_types.enabled_families() {
        let ip = oracle.current(family).await?;
        info!("current {} address: {}", family, ip);
        observed.record(ip);
    }

    let plan = evaluate(&state, &observed, opts.force)?;
    if plan.needs_update {
        info!("address change detected, synchronizing zone {}", zone);
        let report = ZoneSynchronizer::new(zone_api)
            .apply(&zone, &plan.records)
            .await?;
        info!(
            "zone {} synchronized: {} records deleted, {} created",
            zone, report.deleted, report.created
        );
    } else {
        info!("no address change detected");
    }

    observed.apply_to(&mut state);
    if let Err(e) = store.save(&state).await {
        if plan.needs_update {
            error!(
                "the zone was updated but local state could not be saved; \
                 local tracking is stale and the next run will re-apply"
            );
        }
        return Err(e.into());
    }

    Ok(())
}
