// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use substrate_net_api::utils::hex_with_prefix;
use substrate_net_api::{SubstrateClient, logging};
use substrate_net_api_config::{Args, ClientConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();
    let config = ClientConfig::from_env_file(&args.env_file)?;
    let _log_guard = logging::init_with_config(&config.log)?;

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling in-flight request");
                cancel.cancel();
            }
        }
    });

    tracing::info!(url = %config.substrate.url, "Connecting");
    let client = SubstrateClient::from_config(&config.substrate, &config.request, &cancel)
        .await
        .with_context(|| format!("failed to connect to {}", config.substrate.url))?;

    let output = if let Some(method) = args.raw_method.as_deref() {
        serde_json::Value::String(client.invoke_method(method, &cancel).await?)
    } else {
        let module = args.module.as_deref().context("missing module")?;
        let item = args.item.as_deref().context("missing storage item")?;
        match client
            .get_storage(module, item, args.param.as_deref(), &cancel)
            .await?
        {
            Some(value) => serde_json::json!({
                "type": value.type_name(),
                "encoded": hex_with_prefix(&value.encoded()),
                "value": value.to_json(),
            }),
            None => serde_json::Value::Null,
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
