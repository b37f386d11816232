//! Helpers for tests that talk to a real node.
//!
//! The node is taken from `SNA_SUBSTRATE_URL` (default `ws://127.0.0.1:9944`),
//! e.g. `substrate --dev` or `polkadot --dev`. All tests are `#[ignore]`d and
//! run with `cargo test -p integration_tests -- --ignored`.

use anyhow::{Context, Result};
use std::time::Duration;
use substrate_net_api::{ClientOptions, SubstrateClient};
use substrate_net_api_config::ClientConfig;
use tokio_util::sync::CancellationToken;

/// Test configuration constants
pub mod constants {
    /// How long to keep retrying the initial connection (in seconds)
    pub const NODE_READY_TIMEOUT_SECONDS: u64 = 30;

    /// Alice on every dev chain.
    pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Connect to the configured node, retrying once a second until it answers.
pub async fn wait_for_node(timeout_secs: u64) -> Result<SubstrateClient> {
    let config = ClientConfig::from_env().context("invalid SNA_ environment")?;
    let options = ClientOptions::from(&config.request);
    let cancel = CancellationToken::new();

    let mut last_error = None;
    for attempt in 1..=timeout_secs.max(1) {
        match SubstrateClient::connect(&config.substrate.url, options, &cancel).await {
            Ok(client) => return Ok(client),
            Err(err) => {
                tracing::debug!(attempt, error = %err, "node not ready");
                last_error = Some(err);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    Err(anyhow::anyhow!(
        "node at {} not ready after {}s: {}",
        config.substrate.url,
        timeout_secs,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
