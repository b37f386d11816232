// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Runtime metadata model.
//!
//! A read-only snapshot of what the node reports about itself: modules, their
//! storage items and the wire type names of each item's key and value, plus the
//! call names needed to encode a method. The snapshot is built once per
//! connection by [`parse_metadata`] and replaced wholesale on reconnect.
//!
//! All lookups are exact, case-sensitive name matches.

mod parser;

pub use parser::{parse_metadata, resolve_type_name};

use std::fmt;

/// Hash function applied to a storage key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageHasher {
    Blake2_128,
    Blake2_256,
    Blake2_128Concat,
    Twox128,
    Twox256,
    Twox64Concat,
    Identity,
}

impl fmt::Display for StorageHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageHasher::Blake2_128 => "Blake2_128",
            StorageHasher::Blake2_256 => "Blake2_256",
            StorageHasher::Blake2_128Concat => "Blake2_128Concat",
            StorageHasher::Twox128 => "Twox128",
            StorageHasher::Twox256 => "Twox256",
            StorageHasher::Twox64Concat => "Twox64Concat",
            StorageHasher::Identity => "Identity",
        };
        f.write_str(name)
    }
}

/// Storage layout of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Plain,
    Map,
    /// DoubleMap/NMap: more than one hashed key segment.
    MultiKey,
}

/// Key/value description of a storage item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub kind: EntryKind,
    pub hasher: Option<StorageHasher>,
    /// Wire type name of the key, absent for plain items.
    pub key1: Option<String>,
    /// Wire type name of the stored value.
    pub value: String,
}

impl Function {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Plain,
            hasher: None,
            key1: None,
            value: value.into(),
        }
    }

    pub fn map(hasher: StorageHasher, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Map,
            hasher: Some(hasher),
            key1: Some(key.into()),
            value: value.into(),
        }
    }

    /// Multi-key entry. `key1` holds the key types as a tuple, e.g. `(u32, AccountId)`.
    pub fn multi_key(
        keys: &[String],
        hashers: &[StorageHasher],
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: EntryKind::MultiKey,
            hasher: hashers.first().copied(),
            key1: Some(format!("({})", keys.join(", "))),
            value: value.into(),
        }
    }
}

/// A named storage item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub function: Option<Function>,
}

impl Item {
    pub fn new(name: impl Into<String>, function: Function) -> Self {
        Self {
            name: name.into(),
            function: Some(function),
        }
    }
}

/// A dispatchable call of a module, with its index inside the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub index: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    /// Index used as the first byte of an encoded call into this module.
    pub index: u8,
    /// Prefix hashed into storage addresses; usually equal to the module name.
    pub storage_prefix: String,
    pub items: Vec<Item>,
    pub calls: Vec<Call>,
}

impl Module {
    pub fn new(name: impl Into<String>, index: u8) -> Self {
        let name = name.into();
        Self {
            storage_prefix: name.clone(),
            name,
            index,
            items: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn with_storage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_prefix = prefix.into();
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_call(mut self, name: impl Into<String>, index: u8) -> Self {
        self.calls.push(Call {
            name: name.into(),
            index,
        });
        self
    }

    pub fn storage_prefix(&self) -> &str {
        &self.storage_prefix
    }

    pub fn find_storage_item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn find_call(&self, name: &str) -> Option<&Call> {
        self.calls.iter().find(|call| call.name == name)
    }
}

/// Metadata snapshot of one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    origin: String,
    version: u32,
    modules: Vec<Module>,
}

impl Metadata {
    pub fn new(origin: impl Into<String>, version: u32, modules: Vec<Module>) -> Self {
        Self {
            origin: origin.into(),
            version,
            modules,
        }
    }

    /// Node URL the metadata was fetched from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// `(module_index, call_index)` of `module.call`.
    pub fn find_call(&self, module: &str, call: &str) -> Option<(u8, u8)> {
        let module = self.find_module(module)?;
        let call = module.find_call(call)?;
        Some((module.index, call.index))
    }
}
