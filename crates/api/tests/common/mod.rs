//! Shared helpers for the public-API tests: V14 metadata built from
//! `scale-info` types, and a mock node serving it.

#![allow(dead_code)]

use frame_metadata::v14::{
    ExtrinsicMetadata, PalletCallMetadata, PalletMetadata, PalletStorageMetadata,
    RuntimeMetadataV14, StorageEntryMetadata, StorageEntryModifier, StorageEntryType,
    StorageHasher,
};
use frame_metadata::{META_RESERVED, RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Encode;
use scale_info::build::Variants;
use scale_info::{MetaType, Path, Type, TypeInfo, meta_type};
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use sp_core::H256;
use sp_core::crypto::AccountId32;
use substrate_net_api::utils::hex_with_prefix;
use subxt_rpcs::client::mock_rpc_client::Json as MockJson;
use subxt_rpcs::client::{MockRpcClient, RpcClient};

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
pub const ALICE_HEX: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

struct BalancesCall;

impl TypeInfo for BalancesCall {
    type Identity = Self;

    fn type_info() -> Type {
        Type::builder()
            .path(Path::new("Call", "pallet_balances::pallet"))
            .variant(
                Variants::new()
                    .variant_unit("transfer_allow_death", 0)
                    .variant_unit("force_transfer", 2)
                    .variant_unit("burn", 10),
            )
    }
}

struct RuntimeCall;

impl TypeInfo for RuntimeCall {
    type Identity = Self;

    fn type_info() -> Type {
        Type::builder()
            .path(Path::new("RuntimeCall", "node_runtime"))
            .variant(Variants::new())
    }
}

fn entry(
    name: &'static str,
    modifier: StorageEntryModifier,
    ty: StorageEntryType,
) -> StorageEntryMetadata {
    StorageEntryMetadata {
        name,
        modifier,
        ty,
        default: vec![],
        docs: vec![],
    }
}

fn map(hashers: Vec<StorageHasher>, key: MetaType, value: MetaType) -> StorageEntryType {
    StorageEntryType::Map {
        hashers,
        key,
        value,
    }
}

/// System (0): Number, BlockHash, Account, ParentHash.
/// Balances (10): TotalIssuance, Locks (double map); calls by variant index.
pub fn metadata_v14_hex() -> String {
    let system = PalletMetadata {
        name: "System",
        storage: Some(PalletStorageMetadata {
            prefix: "System",
            entries: vec![
                entry(
                    "Number",
                    StorageEntryModifier::Default,
                    StorageEntryType::Plain(meta_type::<u32>()),
                ),
                entry(
                    "BlockHash",
                    StorageEntryModifier::Default,
                    map(
                        vec![StorageHasher::Twox64Concat],
                        meta_type::<u32>(),
                        meta_type::<H256>(),
                    ),
                ),
                entry(
                    "Account",
                    StorageEntryModifier::Default,
                    map(
                        vec![StorageHasher::Blake2_128Concat],
                        meta_type::<AccountId32>(),
                        meta_type::<u128>(),
                    ),
                ),
                entry(
                    "ParentHash",
                    StorageEntryModifier::Default,
                    StorageEntryType::Plain(meta_type::<H256>()),
                ),
            ],
        }),
        calls: None,
        event: None,
        constants: vec![],
        error: None,
        index: 0,
    };

    let balances = PalletMetadata {
        name: "Balances",
        storage: Some(PalletStorageMetadata {
            prefix: "Balances",
            entries: vec![
                entry(
                    "TotalIssuance",
                    StorageEntryModifier::Default,
                    StorageEntryType::Plain(meta_type::<u128>()),
                ),
                entry(
                    "Locks",
                    StorageEntryModifier::Optional,
                    map(
                        vec![StorageHasher::Blake2_128Concat, StorageHasher::Twox64Concat],
                        meta_type::<(AccountId32, u32)>(),
                        meta_type::<u128>(),
                    ),
                ),
            ],
        }),
        calls: Some(PalletCallMetadata {
            ty: meta_type::<BalancesCall>(),
        }),
        event: None,
        constants: vec![],
        error: None,
        index: 10,
    };

    let extrinsic = ExtrinsicMetadata {
        ty: meta_type::<()>(),
        version: 4,
        signed_extensions: vec![],
    };

    let metadata =
        RuntimeMetadataV14::new(vec![system, balances], extrinsic, meta_type::<RuntimeCall>());
    let prefixed = RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V14(metadata));
    hex_with_prefix(&prefixed.encode())
}

/// Storage key of `System.Account` for the 32 raw account bytes.
pub fn system_account_key(account: &[u8; 32]) -> String {
    let mut key = sp_crypto_hashing::twox_128(b"System").to_vec();
    key.extend(sp_crypto_hashing::twox_128(b"Account"));
    key.extend(sp_crypto_hashing::blake2_128(account));
    key.extend(account);
    hex_with_prefix(&key)
}

fn first_param(params: Option<Box<RawValue>>) -> String {
    params
        .and_then(|p| serde_json::from_str::<Vec<serde_json::Value>>(p.get()).ok())
        .and_then(|v| v.first().and_then(|k| k.as_str().map(String::from)))
        .unwrap_or_default()
}

/// Node answering `state_getMetadata` and `state_getStorage` from a map.
#[derive(Clone, Default)]
pub struct Node {
    storage: HashMap<String, String>,
    storage_calls: Arc<AtomicUsize>,
    keys: Arc<Mutex<Vec<String>>>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.storage.insert(key.into(), value.into());
        self
    }

    pub fn storage_calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        self.keys.lock().unwrap().clone()
    }

    pub fn rpc_client(&self) -> RpcClient {
        let metadata = metadata_v14_hex();
        let storage = self.storage.clone();
        let storage_calls = self.storage_calls.clone();
        let keys = self.keys.clone();

        let mock = MockRpcClient::builder()
            .method_handler("state_getMetadata", move |_params: Option<Box<RawValue>>| {
                let metadata = metadata.clone();
                async move { MockJson(metadata) }
            })
            .method_handler("state_getStorage", move |params: Option<Box<RawValue>>| {
                storage_calls.fetch_add(1, Ordering::SeqCst);
                let key = first_param(params);
                keys.lock().unwrap().push(key.clone());
                let value = storage.get(&key).cloned();
                async move { MockJson(value) }
            })
            .build();

        RpcClient::new(mock)
    }
}
