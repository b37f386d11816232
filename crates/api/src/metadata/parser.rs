//! Runtime metadata blob -> [`Metadata`].
//!
//! Legacy versions (V11-V13) name key and value types with strings; V14 onward
//! reference a `PortableRegistry`, and type ids are resolved to readable names
//! here so that the converter registry can be consulted the same way for every
//! version.

use super::{Call, Function, Item, Metadata, Module, StorageHasher};
use crate::error::MetadataError;
use crate::utils::decode_hex;
use frame_metadata::decode_different::DecodeDifferent;
use frame_metadata::{META_RESERVED, RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Decode;
use scale_info::{PortableRegistry, TypeDef};

/// Decode the hex returned by `state_getMetadata`.
pub fn parse_metadata(origin: &str, metadata_hex: &str) -> Result<Metadata, MetadataError> {
    let bytes = decode_hex(metadata_hex)?;
    let prefixed = RuntimeMetadataPrefixed::decode(&mut &bytes[..])?;

    if prefixed.0 != META_RESERVED {
        return Err(MetadataError::InvalidMagic(prefixed.0));
    }

    let version = prefixed.1.version();
    let modules = match &prefixed.1 {
        RuntimeMetadata::V11(meta) => modules_v11(meta),
        RuntimeMetadata::V12(meta) => modules_v12(meta),
        RuntimeMetadata::V13(meta) => modules_v13(meta),
        RuntimeMetadata::V14(meta) => modules_v14(meta),
        RuntimeMetadata::V15(meta) => modules_v15(meta),
        RuntimeMetadata::V16(meta) => modules_v16(meta),
        _ => return Err(MetadataError::UnsupportedVersion(version)),
    };

    Ok(Metadata::new(origin, version, modules))
}

/// Readable name for a type id of a V14+ registry.
///
/// Named types use the last path segment (`AccountId32`, `H256`); anonymous
/// ones are spelled out (`u32`, `Compact<u128>`, `Bytes`, `[u8; 32]`, tuples).
/// Unknown ids fall back to the id itself.
pub fn resolve_type_name(types: &PortableRegistry, type_id: u32) -> String {
    let Some(ty) = types.resolve(type_id) else {
        return type_id.to_string();
    };

    if let Some(last) = ty.path.segments.last() {
        return last.clone();
    }

    match &ty.type_def {
        TypeDef::Primitive(p) => format!("{:?}", p).to_lowercase(),
        TypeDef::Compact(c) => format!("Compact<{}>", resolve_type_name(types, c.type_param.id)),
        TypeDef::Sequence(s) => {
            let inner = resolve_type_name(types, s.type_param.id);
            if inner == "u8" {
                "Bytes".to_string()
            } else {
                format!("Vec<{}>", inner)
            }
        }
        TypeDef::Array(a) => format!("[{}; {}]", resolve_type_name(types, a.type_param.id), a.len),
        TypeDef::Tuple(t) => {
            let inner: Vec<String> = t
                .fields
                .iter()
                .map(|f| resolve_type_name(types, f.id))
                .collect();
            format!("({})", inner.join(", "))
        }
        _ => type_id.to_string(),
    }
}

/// Key type names of a multi-key map; the key type id is a tuple there.
fn key_type_names(types: &PortableRegistry, type_id: u32) -> Vec<String> {
    match types.resolve(type_id).map(|ty| &ty.type_def) {
        Some(TypeDef::Tuple(tuple)) => tuple
            .fields
            .iter()
            .map(|f| resolve_type_name(types, f.id))
            .collect(),
        _ => vec![resolve_type_name(types, type_id)],
    }
}

fn call_variants(types: &PortableRegistry, type_id: u32) -> Vec<Call> {
    let Some(ty) = types.resolve(type_id) else {
        return Vec::new();
    };
    let TypeDef::Variant(variant_def) = &ty.type_def else {
        return Vec::new();
    };

    variant_def
        .variants
        .iter()
        .map(|v| Call {
            name: v.name.clone(),
            index: v.index,
        })
        .collect()
}

// ============================================================================
// Legacy helpers
// ============================================================================

fn extract_str<'a>(s: &'a DecodeDifferent<&'static str, String>) -> &'a str {
    match s {
        DecodeDifferent::Decoded(v) => v.as_str(),
        DecodeDifferent::Encode(s) => s,
    }
}

fn decoded<B: 'static, O: 'static>(value: &DecodeDifferent<B, O>) -> Option<&O> {
    match value {
        DecodeDifferent::Decoded(v) => Some(v),
        DecodeDifferent::Encode(_) => None,
    }
}

fn legacy_calls<'a>(names: impl Iterator<Item = &'a str>) -> Vec<Call> {
    names
        .enumerate()
        .map(|(index, name)| Call {
            name: name.to_string(),
            index: index as u8,
        })
        .collect()
}

macro_rules! hasher_fn {
    ($fn_name:ident, $version:ident) => {
        fn $fn_name(hasher: &frame_metadata::$version::StorageHasher) -> StorageHasher {
            use frame_metadata::$version::StorageHasher as Raw;
            match hasher {
                Raw::Blake2_128 => StorageHasher::Blake2_128,
                Raw::Blake2_256 => StorageHasher::Blake2_256,
                Raw::Blake2_128Concat => StorageHasher::Blake2_128Concat,
                Raw::Twox128 => StorageHasher::Twox128,
                Raw::Twox256 => StorageHasher::Twox256,
                Raw::Twox64Concat => StorageHasher::Twox64Concat,
                Raw::Identity => StorageHasher::Identity,
            }
        }
    };
}

hasher_fn!(hasher_v11, v11);
hasher_fn!(hasher_v12, v12);
hasher_fn!(hasher_v13, v13);
hasher_fn!(hasher_v14, v14);
hasher_fn!(hasher_v15, v15);
hasher_fn!(hasher_v16, v16);

// ============================================================================
// V11 (no module index: calls are indexed by position among modules with calls)
// ============================================================================

fn item_v11(entry: &frame_metadata::v11::StorageEntryMetadata) -> Item {
    use frame_metadata::v11::StorageEntryType;

    let function = match &entry.ty {
        StorageEntryType::Plain(value) => Function::plain(extract_str(value)),
        StorageEntryType::Map {
            hasher, key, value, ..
        } => Function::map(hasher_v11(hasher), extract_str(key), extract_str(value)),
        StorageEntryType::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => Function::multi_key(
            &[extract_str(key1).to_string(), extract_str(key2).to_string()],
            &[hasher_v11(hasher), hasher_v11(key2_hasher)],
            extract_str(value),
        ),
    };
    Item::new(extract_str(&entry.name), function)
}

fn modules_v11(meta: &frame_metadata::v11::RuntimeMetadataV11) -> Vec<Module> {
    let Some(modules) = decoded(&meta.modules) else {
        return Vec::new();
    };

    let mut with_calls = 0u8;
    modules
        .iter()
        .enumerate()
        .map(|(position, m)| {
            let index = if m.calls.is_some() {
                let index = with_calls;
                with_calls = with_calls.saturating_add(1);
                index
            } else {
                position as u8
            };

            let mut module = Module::new(extract_str(&m.name), index);
            if let Some(storage) = m.storage.as_ref().and_then(decoded) {
                module.storage_prefix = extract_str(&storage.prefix).to_string();
                if let Some(entries) = decoded(&storage.entries) {
                    module.items = entries.iter().map(item_v11).collect();
                }
            }
            if let Some(calls) = m.calls.as_ref().and_then(decoded) {
                module.calls = legacy_calls(calls.iter().map(|c| extract_str(&c.name)));
            }
            module
        })
        .collect()
}

// ============================================================================
// V12 (adds module index)
// ============================================================================

fn item_v12(entry: &frame_metadata::v12::StorageEntryMetadata) -> Item {
    use frame_metadata::v12::StorageEntryType;

    let function = match &entry.ty {
        StorageEntryType::Plain(value) => Function::plain(extract_str(value)),
        StorageEntryType::Map {
            hasher, key, value, ..
        } => Function::map(hasher_v12(hasher), extract_str(key), extract_str(value)),
        StorageEntryType::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => Function::multi_key(
            &[extract_str(key1).to_string(), extract_str(key2).to_string()],
            &[hasher_v12(hasher), hasher_v12(key2_hasher)],
            extract_str(value),
        ),
    };
    Item::new(extract_str(&entry.name), function)
}

fn modules_v12(meta: &frame_metadata::v12::RuntimeMetadataV12) -> Vec<Module> {
    let Some(modules) = decoded(&meta.modules) else {
        return Vec::new();
    };

    modules
        .iter()
        .map(|m| {
            let mut module = Module::new(extract_str(&m.name), m.index);
            if let Some(storage) = m.storage.as_ref().and_then(decoded) {
                module.storage_prefix = extract_str(&storage.prefix).to_string();
                if let Some(entries) = decoded(&storage.entries) {
                    module.items = entries.iter().map(item_v12).collect();
                }
            }
            if let Some(calls) = m.calls.as_ref().and_then(decoded) {
                module.calls = legacy_calls(calls.iter().map(|c| extract_str(&c.name)));
            }
            module
        })
        .collect()
}

// ============================================================================
// V13 (adds NMap)
// ============================================================================

fn item_v13(entry: &frame_metadata::v13::StorageEntryMetadata) -> Item {
    use frame_metadata::v13::StorageEntryType;

    let function = match &entry.ty {
        StorageEntryType::Plain(value) => Function::plain(extract_str(value)),
        StorageEntryType::Map {
            hasher, key, value, ..
        } => Function::map(hasher_v13(hasher), extract_str(key), extract_str(value)),
        StorageEntryType::DoubleMap {
            hasher,
            key1,
            key2,
            value,
            key2_hasher,
        } => Function::multi_key(
            &[extract_str(key1).to_string(), extract_str(key2).to_string()],
            &[hasher_v13(hasher), hasher_v13(key2_hasher)],
            extract_str(value),
        ),
        StorageEntryType::NMap {
            keys,
            hashers,
            value,
        } => {
            let keys = decoded(keys).cloned().unwrap_or_default();
            let hashers: Vec<StorageHasher> = decoded(hashers)
                .map(|h| h.iter().map(hasher_v13).collect())
                .unwrap_or_default();
            Function::multi_key(&keys, &hashers, extract_str(value))
        }
    };
    Item::new(extract_str(&entry.name), function)
}

fn modules_v13(meta: &frame_metadata::v13::RuntimeMetadataV13) -> Vec<Module> {
    let Some(modules) = decoded(&meta.modules) else {
        return Vec::new();
    };

    modules
        .iter()
        .map(|m| {
            let mut module = Module::new(extract_str(&m.name), m.index);
            if let Some(storage) = m.storage.as_ref().and_then(decoded) {
                module.storage_prefix = extract_str(&storage.prefix).to_string();
                if let Some(entries) = decoded(&storage.entries) {
                    module.items = entries.iter().map(item_v13).collect();
                }
            }
            if let Some(calls) = m.calls.as_ref().and_then(decoded) {
                module.calls = legacy_calls(calls.iter().map(|c| extract_str(&c.name)));
            }
            module
        })
        .collect()
}

// ============================================================================
// V14-V16 (PortableRegistry). The three layouts agree on everything read here
// but are distinct types, hence the macro.
// ============================================================================

macro_rules! modern_modules {
    ($fn_name:ident, $version:ident, $meta:ident, $hasher:ident) => {
        fn $fn_name(meta: &frame_metadata::$version::$meta) -> Vec<Module> {
            use frame_metadata::$version::StorageEntryType;

            let types = &meta.types;
            meta.pallets
                .iter()
                .map(|pallet| {
                    let mut module = Module::new(pallet.name.clone(), pallet.index);
                    if let Some(storage) = &pallet.storage {
                        module.storage_prefix = storage.prefix.clone();
                        module.items = storage
                            .entries
                            .iter()
                            .map(|entry| {
                                let function = match &entry.ty {
                                    StorageEntryType::Plain(ty) => {
                                        Function::plain(resolve_type_name(types, ty.id))
                                    }
                                    StorageEntryType::Map {
                                        hashers,
                                        key,
                                        value,
                                    } => {
                                        let value = resolve_type_name(types, value.id);
                                        let hashers: Vec<StorageHasher> =
                                            hashers.iter().map($hasher).collect();
                                        match hashers.as_slice() {
                                            [hasher] => Function::map(
                                                *hasher,
                                                resolve_type_name(types, key.id),
                                                value,
                                            ),
                                            _ => Function::multi_key(
                                                &key_type_names(types, key.id),
                                                &hashers,
                                                value,
                                            ),
                                        }
                                    }
                                };
                                Item::new(entry.name.clone(), function)
                            })
                            .collect();
                    }
                    if let Some(calls) = &pallet.calls {
                        module.calls = call_variants(types, calls.ty.id);
                    }
                    module
                })
                .collect()
        }
    };
}

modern_modules!(modules_v14, v14, RuntimeMetadataV14, hasher_v14);
modern_modules!(modules_v15, v15, RuntimeMetadataV15, hasher_v15);
modern_modules!(modules_v16, v16, RuntimeMetadataV16, hasher_v16);
