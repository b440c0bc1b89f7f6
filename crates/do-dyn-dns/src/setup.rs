//! Interactive first-run configuration
//!
//! Asks for everything the synchronizer needs and saves it through the
//! same state store the reconciliation run reads from. Triggered by
//! `--config` or automatically when no access token is configured yet.

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};
use dyndns_core::traits::StateStore;
use dyndns_core::{FileStateStore, RecordTypes, SyncState};

/// Default TTL offered for created records
const DEFAULT_TTL: u32 = 1800;

/// Ask the configuration questions and persist the answers
pub async fn interactive(store: &FileStateStore) -> Result<()> {
    println!(
        "do-dyn-dns v{}\n\n\
         I'm going to ask a few questions to configure this app. (To\n\
         reconfigure it in the future, run `do-dyn-dns --config`.)\n",
        env!("CARGO_PKG_VERSION")
    );

    println!(
        "You'll need to log in to your DigitalOcean control panel and\n\
         create a Personal Access Token from the API dashboard, and paste\n\
         the token at the prompt below.\n"
    );

    let access_token: String = Input::new()
        .with_prompt("DigitalOcean access token")
        .interact_text()
        .context("failed to read access token")?;

    println!(
        "\nNext, make sure your domain name is set up under Networking in\n\
         the DigitalOcean dashboard, then enter it as it appears there,\n\
         for example: example.com\n"
    );

    let domain: String = Input::new()
        .with_prompt("Domain name from your DNS dashboard")
        .interact_text()
        .context("failed to read domain name")?;

    let a = Confirm::new()
        .with_prompt("Support IPv4 (A records)?")
        .default(true)
        .interact()?;
    let aaaa = Confirm::new()
        .with_prompt("Support IPv6 (AAAA records)?")
        .default(false)
        .interact()?;

    let ttl: u32 = Input::new()
        .with_prompt("DNS record TTL")
        .default(DEFAULT_TTL)
        .interact_text()?;

    let state = SyncState {
        access_token: access_token.trim().to_string(),
        domain: domain.trim().to_string(),
        ttl,
        record_types: RecordTypes { a, aaaa },
        ..Default::default()
    };

    store.save(&state).await?;
    println!("\nConfiguration saved to {}", store.path().display());

    Ok(())
}
