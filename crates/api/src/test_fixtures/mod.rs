//! Test fixtures: a scriptable mock node and SCALE-encoded legacy metadata.
//!
//! The metadata structs below mirror the V11/V13 wire layout field by field so
//! that a blob can be produced with `parity-scale-codec` alone. Lists that are
//! always empty in these fixtures (events, constants, errors) are typed as
//! `Vec<String>`; an empty vector encodes the same regardless of element type.

use crate::consts::{STATE_GET_METADATA, STATE_GET_STORAGE};
use parity_scale_codec::Encode;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use subxt_rpcs::client::mock_rpc_client::Json as MockJson;
use subxt_rpcs::client::{MockRpcClient, RpcClient};

/// twox128("System") ++ twox128("Number")
pub const SYSTEM_NUMBER_KEY: &str =
    "0x26aa394eea5630e07c48ae0c9558cef702a5c1b19ab7a04f536c519aca4983ac";

const MAGIC: u32 = 0x6174_656d;

// Variant order is the wire index.
#[allow(dead_code)]
#[derive(Encode)]
enum Hasher {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
    Identity,
}

#[derive(Encode)]
enum EntryModifier {
    Optional,
    Default,
}

#[derive(Encode)]
enum EntryType {
    Plain(String),
    Map {
        hasher: Hasher,
        key: String,
        value: String,
        unused: bool,
    },
    DoubleMap {
        hasher: Hasher,
        key1: String,
        key2: String,
        value: String,
        key2_hasher: Hasher,
    },
}

#[derive(Encode)]
struct Entry {
    name: String,
    modifier: EntryModifier,
    ty: EntryType,
    default: Vec<u8>,
    docs: Vec<String>,
}

#[derive(Encode)]
struct Storage {
    prefix: String,
    entries: Vec<Entry>,
}

#[derive(Encode)]
struct CallArg {
    name: String,
    ty: String,
}

#[derive(Encode)]
struct CallMeta {
    name: String,
    arguments: Vec<CallArg>,
    docs: Vec<String>,
}

#[derive(Encode)]
struct ModuleV11 {
    name: String,
    storage: Option<Storage>,
    calls: Option<Vec<CallMeta>>,
    events: Option<Vec<String>>,
    constants: Vec<String>,
    errors: Vec<String>,
}

#[derive(Encode)]
struct ModuleV13 {
    name: String,
    storage: Option<Storage>,
    calls: Option<Vec<CallMeta>>,
    events: Option<Vec<String>>,
    constants: Vec<String>,
    errors: Vec<String>,
    index: u8,
}

#[derive(Encode)]
struct Extrinsic {
    version: u8,
    signed_extensions: Vec<String>,
}

fn plain(name: &str, value: &str, default: Vec<u8>) -> Entry {
    Entry {
        name: name.to_string(),
        modifier: EntryModifier::Default,
        ty: EntryType::Plain(value.to_string()),
        default,
        docs: vec![],
    }
}

fn map(name: &str, hasher: Hasher, key: &str, value: &str) -> Entry {
    Entry {
        name: name.to_string(),
        modifier: EntryModifier::Optional,
        ty: EntryType::Map {
            hasher,
            key: key.to_string(),
            value: value.to_string(),
            unused: false,
        },
        default: vec![],
        docs: vec![],
    }
}

fn calls(names: &[&str]) -> Option<Vec<CallMeta>> {
    Some(
        names
            .iter()
            .map(|name| CallMeta {
                name: name.to_string(),
                arguments: vec![],
                docs: vec![],
            })
            .collect(),
    )
}

fn storage(prefix: &str, entries: Vec<Entry>) -> Option<Storage> {
    Some(Storage {
        prefix: prefix.to_string(),
        entries,
    })
}

fn system_storage() -> Option<Storage> {
    storage(
        "System",
        vec![
            plain("Number", "T::BlockNumber", vec![0; 4]),
            map("BlockHash", Hasher::Twox64Concat, "T::BlockNumber", "T::Hash"),
            map("Account", Hasher::Blake2_128Concat, "T::AccountId", "AccountInfo"),
        ],
    )
}

fn timestamp_storage() -> Option<Storage> {
    storage("Timestamp", vec![plain("Now", "T::Moment", vec![0; 8])])
}

fn prefixed(version: u8, body: impl Encode) -> Vec<u8> {
    let mut bytes = MAGIC.encode();
    bytes.push(version);
    body.encode_to(&mut bytes);
    bytes
}

fn extrinsic() -> Extrinsic {
    Extrinsic {
        version: 4,
        signed_extensions: vec!["CheckNonce".to_string()],
    }
}

/// V13 metadata with System (0), Timestamp (3) and Balances (5).
pub fn metadata_v13_bytes() -> Vec<u8> {
    let balances = storage(
        "Balances",
        vec![
            plain("TotalIssuance", "T::Balance", vec![0; 16]),
            Entry {
                name: "Reserves".to_string(),
                modifier: EntryModifier::Default,
                ty: EntryType::DoubleMap {
                    hasher: Hasher::Blake2_128Concat,
                    key1: "T::AccountId".to_string(),
                    key2: "u32".to_string(),
                    value: "T::Balance".to_string(),
                    key2_hasher: Hasher::Twox64Concat,
                },
                default: vec![0; 16],
                docs: vec![],
            },
            plain("Broken", "", vec![]),
        ],
    );

    let modules = vec![
        ModuleV13 {
            name: "System".to_string(),
            storage: system_storage(),
            calls: calls(&["fill_block", "remark"]),
            events: None,
            constants: vec![],
            errors: vec![],
            index: 0,
        },
        ModuleV13 {
            name: "Timestamp".to_string(),
            storage: timestamp_storage(),
            calls: calls(&["set"]),
            events: None,
            constants: vec![],
            errors: vec![],
            index: 3,
        },
        ModuleV13 {
            name: "Balances".to_string(),
            storage: balances,
            calls: calls(&["transfer", "set_balance"]),
            events: None,
            constants: vec![],
            errors: vec![],
            index: 5,
        },
    ];

    prefixed(13, (modules, extrinsic()))
}

pub fn metadata_v13_hex() -> String {
    format!("0x{}", hex::encode(metadata_v13_bytes()))
}

/// V11 metadata; Timestamp declares no calls.
pub fn metadata_v11_hex() -> String {
    let modules = vec![
        ModuleV11 {
            name: "System".to_string(),
            storage: system_storage(),
            calls: calls(&["fill_block", "remark"]),
            events: None,
            constants: vec![],
            errors: vec![],
        },
        ModuleV11 {
            name: "Timestamp".to_string(),
            storage: timestamp_storage(),
            calls: None,
            events: None,
            constants: vec![],
            errors: vec![],
        },
        ModuleV11 {
            name: "Balances".to_string(),
            storage: None,
            calls: calls(&["transfer"]),
            events: None,
            constants: vec![],
            errors: vec![],
        },
    ];

    format!("0x{}", hex::encode(prefixed(11, (modules, extrinsic()))))
}

fn first_param(params: Option<Box<RawValue>>) -> String {
    params
        .and_then(|p| serde_json::from_str::<serde_json::Value>(p.get()).ok())
        .and_then(|v| v.get(0).and_then(|k| k.as_str().map(String::from)))
        .unwrap_or_default()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum StorageMode {
    Respond,
    Pending,
    Missing,
}

/// Scriptable node: serves the V13 fixture and answers storage reads from a map,
/// counting every request it receives.
pub struct MockNode {
    metadata_hex: String,
    storage: HashMap<String, Option<String>>,
    default_storage: Option<String>,
    storage_mode: StorageMode,
    metadata_calls: Arc<AtomicUsize>,
    storage_calls: Arc<AtomicUsize>,
    requested_keys: Arc<Mutex<Vec<String>>>,
}

impl Default for MockNode {
    fn default() -> Self {
        Self::new()
    }
}

impl MockNode {
    pub fn new() -> Self {
        Self {
            metadata_hex: metadata_v13_hex(),
            storage: HashMap::new(),
            default_storage: None,
            storage_mode: StorageMode::Respond,
            metadata_calls: Arc::new(AtomicUsize::new(0)),
            storage_calls: Arc::new(AtomicUsize::new(0)),
            requested_keys: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_storage(mut self, key: &str, value: Option<String>) -> Self {
        self.storage.insert(key.to_string(), value);
        self
    }

    /// Value returned for keys not set with [`MockNode::with_storage`].
    pub fn with_default_storage(mut self, value: Option<String>) -> Self {
        self.default_storage = value;
        self
    }

    /// Storage reads never complete.
    pub fn with_pending_storage(mut self) -> Self {
        self.storage_mode = StorageMode::Pending;
        self
    }

    /// No `state_getStorage` handler at all.
    pub fn without_storage(mut self) -> Self {
        self.storage_mode = StorageMode::Missing;
        self
    }

    pub fn with_broken_metadata(mut self) -> Self {
        self.metadata_hex = "0x00".to_string();
        self
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn storage_calls(&self) -> usize {
        self.storage_calls.load(Ordering::SeqCst)
    }

    pub fn requested_keys(&self) -> Vec<String> {
        self.requested_keys.lock().unwrap().clone()
    }

    pub fn rpc_client(&self) -> RpcClient {
        let metadata_hex = self.metadata_hex.clone();
        let metadata_calls = self.metadata_calls.clone();

        let mut builder = MockRpcClient::builder()
            .method_handler(STATE_GET_METADATA, move |_params: Option<Box<RawValue>>| {
                metadata_calls.fetch_add(1, Ordering::SeqCst);
                let metadata_hex = metadata_hex.clone();
                async move { MockJson(metadata_hex) }
            })
            .method_handler("system_name", async |_params| MockJson("substrate-node"))
            .method_handler(
                "author_submitExtrinsic",
                |params: Option<Box<RawValue>>| {
                    let call = first_param(params);
                    async move { MockJson(call) }
                },
            );

        if self.storage_mode != StorageMode::Missing {
            let storage = self.storage.clone();
            let default_storage = self.default_storage.clone();
            let pending = self.storage_mode == StorageMode::Pending;
            let storage_calls = self.storage_calls.clone();
            let requested_keys = self.requested_keys.clone();

            builder = builder.method_handler(
                STATE_GET_STORAGE,
                move |params: Option<Box<RawValue>>| {
                    storage_calls.fetch_add(1, Ordering::SeqCst);
                    let key = first_param(params);
                    requested_keys.lock().unwrap().push(key.clone());
                    let value = storage
                        .get(&key)
                        .cloned()
                        .unwrap_or_else(|| default_storage.clone());

                    async move {
                        if pending {
                            std::future::pending::<()>().await;
                        }
                        MockJson(value)
                    }
                },
            );
        }

        RpcClient::new(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_fixture_has_magic() {
        let bytes = metadata_v13_bytes();
        assert_eq!(&bytes[0..4], b"meta");
        assert_eq!(bytes[4], 13);
        assert!(metadata_v11_hex().starts_with("0x6d6574610b"));
    }
}
