// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Query orchestration against a node.
//!
//! A storage query walks `Resolving -> KeyEncoding -> AddressBuilding ->
//! Dispatching -> Decoding -> Done`, or ends in `Failed`. Everything before
//! `Dispatching` is local and fails without touching the transport. Dispatch is a single round trip,
//! raced against the caller's [`CancellationToken`] and the request timeout.

use crate::consts::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, STATE_GET_METADATA, STATE_GET_STORAGE,
};
use crate::converters::{TypeConverter, TypeRegistry};
use crate::error::{ClientError, RegistryError};
use crate::metadata::{Metadata, parse_metadata};
use crate::request::{Method, StorageKeyBuilder};
use crate::types::DecodedValue;
use crate::utils::hex_with_prefix;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use subxt_rpcs::client::RpcParams;
use subxt_rpcs::{RpcClient, rpc_params};
use substrate_net_api_config::{RequestConfig, SubstrateConfig};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryState {
    Resolving,
    KeyEncoding,
    AddressBuilding,
    Dispatching,
    Decoding,
    Done,
    Failed,
}

impl fmt::Display for QueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClientOptions {
    /// Upper bound for a single RPC round trip.
    pub request_timeout: Duration,
    /// Upper bound for opening the connection and fetching metadata.
    pub connect_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl From<&RequestConfig> for ClientOptions {
    fn from(config: &RequestConfig) -> Self {
        Self {
            request_timeout: config.timeout(),
            connect_timeout: config.connect_timeout(),
        }
    }
}

/// Collects extra converters before the registry is frozen into a client.
#[derive(Debug)]
pub struct ClientBuilder {
    registry: TypeRegistry,
    options: ClientOptions,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            registry: TypeRegistry::with_defaults(),
            options: ClientOptions::default(),
        }
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    pub fn register(
        mut self,
        converter: impl TypeConverter + 'static,
    ) -> Result<Self, RegistryError> {
        self.registry.register(converter)?;
        Ok(self)
    }

    pub async fn connect(
        self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<SubstrateClient, ClientError> {
        let rpc = open_rpc_client(url, self.options.connect_timeout, cancel).await?;
        SubstrateClient::init(rpc, Some(url.to_string()), url, self.registry, self.options, cancel)
            .await
    }

    pub async fn from_rpc_client(
        self,
        rpc: RpcClient,
        cancel: &CancellationToken,
    ) -> Result<SubstrateClient, ClientError> {
        SubstrateClient::init(rpc, None, "rpc-client", self.registry, self.options, cancel).await
    }
}

/// Client bound to one node and the metadata it reported at connect time.
pub struct SubstrateClient {
    rpc: RpcClient,
    url: Option<String>,
    metadata: Arc<Metadata>,
    registry: Arc<TypeRegistry>,
    keys: StorageKeyBuilder,
    options: ClientOptions,
}

impl SubstrateClient {
    /// Connect with the default converters.
    pub async fn connect(
        url: &str,
        options: ClientOptions,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        ClientBuilder::new().options(options).connect(url, cancel).await
    }

    /// Connect using the `SNA_SUBSTRATE_URL` and `SNA_REQUEST_*` settings.
    pub async fn from_config(
        substrate: &SubstrateConfig,
        request: &RequestConfig,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        Self::connect(&substrate.url, ClientOptions::from(request), cancel).await
    }

    /// Wrap an existing transport, e.g. a mock.
    pub async fn from_rpc_client(
        rpc: RpcClient,
        options: ClientOptions,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        ClientBuilder::new()
            .options(options)
            .from_rpc_client(rpc, cancel)
            .await
    }

    async fn init(
        rpc: RpcClient,
        url: Option<String>,
        origin: &str,
        registry: TypeRegistry,
        options: ClientOptions,
        cancel: &CancellationToken,
    ) -> Result<Self, ClientError> {
        let metadata = fetch_metadata(&rpc, origin, options.connect_timeout, cancel).await?;
        tracing::info!(
            origin,
            version = metadata.version(),
            modules = metadata.modules().len(),
            "Connected and loaded runtime metadata"
        );

        Ok(Self {
            rpc,
            url,
            metadata: Arc::new(metadata),
            registry: Arc::new(registry),
            keys: StorageKeyBuilder::new(),
            options,
        })
    }

    /// Reopen the connection (when the client owns its URL) and replace the
    /// metadata snapshot.
    pub async fn reconnect(&mut self, cancel: &CancellationToken) -> Result<(), ClientError> {
        if let Some(url) = &self.url {
            self.rpc = open_rpc_client(url, self.options.connect_timeout, cancel).await?;
        }
        let origin = self.metadata.origin().to_string();
        let metadata =
            fetch_metadata(&self.rpc, &origin, self.options.connect_timeout, cancel).await?;
        tracing::info!(origin, version = metadata.version(), "Reloaded runtime metadata");
        self.metadata = Arc::new(metadata);
        Ok(())
    }

    pub fn metadata(&self) -> Arc<Metadata> {
        Arc::clone(&self.metadata)
    }

    pub fn registry(&self) -> Arc<TypeRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Read `module.item`, keyed by `param` for map items.
    ///
    /// Returns `Ok(None)` when the node has nothing stored under the address.
    pub async fn get_storage(
        &self,
        module: &str,
        item: &str,
        param: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<Box<dyn DecodedValue>>, ClientError> {
        self.query_storage(module, item, param, cancel)
            .await
            .inspect_err(|err| {
                tracing::debug!(
                    state = %QueryState::Failed,
                    module,
                    item,
                    kind = ?err.kind(),
                    error = %err,
                    "storage query"
                );
            })
    }

    async fn query_storage(
        &self,
        module: &str,
        item: &str,
        param: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Option<Box<dyn DecodedValue>>, ClientError> {
        tracing::debug!(state = %QueryState::Resolving, module, item, "storage query");
        let not_found = || ClientError::ModuleOrItemNotFound {
            module: module.to_string(),
            item: item.to_string(),
            origin: self.metadata.origin().to_string(),
        };
        let module_meta = self.metadata.find_module(module).ok_or_else(not_found)?;
        let item_meta = module_meta.find_storage_item(item).ok_or_else(not_found)?;

        let value_type = match &item_meta.function {
            Some(function) if !function.value.is_empty() => function.value.as_str(),
            _ => {
                return Err(ClientError::InvalidReturnType {
                    module: module.to_string(),
                    item: item.to_string(),
                });
            }
        };

        if param.is_some() {
            tracing::debug!(state = %QueryState::KeyEncoding, module, item, "storage query");
        }
        let address = self
            .keys
            .address(&self.registry, module_meta, item_meta, param)?;
        tracing::debug!(
            state = %QueryState::AddressBuilding,
            module,
            item,
            address = %hex_with_prefix(&address),
            "storage query"
        );

        let converter = self.registry.resolve(value_type)?;

        tracing::debug!(state = %QueryState::Dispatching, module, item, "storage query");
        let raw: Option<String> = self
            .dispatch(STATE_GET_STORAGE, rpc_params![hex_with_prefix(&address)], cancel)
            .await?;

        let Some(raw) = raw else {
            tracing::debug!(state = %QueryState::Done, module, item, "storage slot empty");
            return Ok(None);
        };

        tracing::debug!(state = %QueryState::Decoding, module, item, value_type, "storage query");
        let value = converter.create(&raw)?;
        tracing::debug!(state = %QueryState::Done, module, item, "storage query");
        Ok(Some(value))
    }

    /// Call a parameterless RPC method and return its raw result.
    pub async fn invoke_method(
        &self,
        method: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ClientError> {
        tracing::debug!(state = %QueryState::Dispatching, method, "raw method");
        let result: serde_json::Value = self.dispatch(method, rpc_params![], cancel).await?;
        Ok(match result {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Send an encoded call as the single hex parameter of `rpc_method`.
    pub async fn submit_call(
        &self,
        rpc_method: &str,
        call: &Method,
        cancel: &CancellationToken,
    ) -> Result<String, ClientError> {
        let encoded = call.to_hex();
        tracing::debug!(state = %QueryState::Dispatching, rpc_method, call = %encoded, "call");
        self.dispatch(rpc_method, rpc_params![encoded], cancel).await
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: &str,
        params: RpcParams,
        cancel: &CancellationToken,
    ) -> Result<T, ClientError> {
        request_with_timeout(&self.rpc, method, params, self.options.request_timeout, cancel)
            .await
            .map_err(|err| {
                tracing::debug!(method, error = %err, "dispatch failed");
                err
            })
    }
}

impl fmt::Debug for SubstrateClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubstrateClient")
            .field("origin", &self.metadata.origin())
            .field("metadata_version", &self.metadata.version())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

async fn request_with_timeout<T: DeserializeOwned>(
    rpc: &RpcClient,
    method: &str,
    params: RpcParams,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, ClientError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = tokio::time::timeout(timeout, rpc.request::<T>(method, params)) => match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(ClientError::TransportFailure(err)),
            Err(_) => Err(ClientError::Timeout(timeout)),
        },
    }
}

async fn fetch_metadata(
    rpc: &RpcClient,
    origin: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Metadata, ClientError> {
    let metadata_hex: String =
        request_with_timeout(rpc, STATE_GET_METADATA, rpc_params![], timeout, cancel).await?;
    Ok(parse_metadata(origin, &metadata_hex)?)
}

async fn open_rpc_client(
    url: &str,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<RpcClient, ClientError> {
    let insecure = SubstrateConfig {
        url: url.to_string(),
    }
    .is_insecure();

    let connect = async {
        if insecure {
            RpcClient::from_insecure_url(url).await
        } else {
            RpcClient::from_url(url).await
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ClientError::Cancelled),
        result = tokio::time::timeout(timeout, connect) => match result {
            Ok(Ok(rpc)) => Ok(rpc),
            Ok(Err(err)) => Err(ClientError::Connection(err)),
            Err(_) => Err(ClientError::Timeout(timeout)),
        },
    }
}
