//! Storage address construction.
//!
//! An address is `hash(module prefix) ++ hash(item name)`, followed for map
//! items by the encoded key run through the item's own hasher.

use super::hasher::StorageKeyHasher;
use crate::converters::TypeRegistry;
use crate::error::StorageRequestError;
use crate::metadata::{EntryKind, Function, Item, Module, StorageHasher};

pub struct StorageKeyBuilder<H = StorageHasher> {
    prefix_hasher: H,
}

impl Default for StorageKeyBuilder {
    fn default() -> Self {
        Self {
            prefix_hasher: StorageHasher::Twox128,
        }
    }
}

impl StorageKeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: StorageKeyHasher> StorageKeyBuilder<H> {
    /// Builder hashing the module prefix and item name with `prefix_hasher`.
    pub fn with_prefix_hasher(prefix_hasher: H) -> Self {
        Self { prefix_hasher }
    }

    /// Address of a plain item. The item's key type is not consulted.
    pub fn build(&self, module: &Module, item: &Item) -> Vec<u8> {
        let mut address = self.prefix_hasher.hash(module.storage_prefix().as_bytes());
        address.extend(self.prefix_hasher.hash(item.name.as_bytes()));
        address
    }

    /// Address of a map item for an already encoded key.
    pub fn build_with_key(
        &self,
        module: &Module,
        item: &Item,
        key: &[u8],
    ) -> Result<Vec<u8>, StorageRequestError> {
        let function = keyed_function(module, item)?;
        // Map functions always carry a hasher; Identity is the no-op.
        let hasher = function.hasher.unwrap_or(StorageHasher::Identity);

        let mut address = self.build(module, item);
        address.extend(hasher.hash(key));
        Ok(address)
    }

    /// Full address for `item`, encoding `param` with the converter named by
    /// the item's key type. Keyed items without a parameter fail with
    /// [`StorageRequestError::ParameterRequired`]; multi-key items fail with
    /// [`StorageRequestError::UnsupportedEntry`] whether or not one is given.
    pub fn address(
        &self,
        registry: &TypeRegistry,
        module: &Module,
        item: &Item,
        param: Option<&str>,
    ) -> Result<Vec<u8>, StorageRequestError> {
        let function = item.function.as_ref();
        if function.is_some_and(|f| f.kind == EntryKind::MultiKey) {
            return Err(StorageRequestError::UnsupportedEntry {
                module: module.name.clone(),
                item: item.name.clone(),
            });
        }
        let key_type = function.and_then(|f| f.key1.as_deref());

        match (key_type, param) {
            (None, None) => Ok(self.build(module, item)),
            (None, Some(_)) => Err(StorageRequestError::UnexpectedParameter {
                module: module.name.clone(),
                item: item.name.clone(),
            }),
            (Some(key_type), None) => Err(StorageRequestError::ParameterRequired {
                module: module.name.clone(),
                item: item.name.clone(),
                key_type: key_type.to_string(),
            }),
            (Some(_), Some(param)) => {
                let key = encode_key(registry, module, item, param)?;
                self.build_with_key(module, item, &key)
            }
        }
    }
}

/// Encode `param` as the item's key type through the registry.
pub fn encode_key(
    registry: &TypeRegistry,
    module: &Module,
    item: &Item,
    param: &str,
) -> Result<Vec<u8>, StorageRequestError> {
    let function = keyed_function(module, item)?;
    let key_type = function.key1.as_deref().unwrap_or_default();
    let converter = registry.resolve(key_type)?;
    Ok(converter.encode_param(param)?)
}

fn keyed_function<'a>(module: &Module, item: &'a Item) -> Result<&'a Function, StorageRequestError> {
    match &item.function {
        Some(function) if function.kind == EntryKind::Map => Ok(function),
        Some(function) if function.kind == EntryKind::MultiKey => {
            Err(StorageRequestError::UnsupportedEntry {
                module: module.name.clone(),
                item: item.name.clone(),
            })
        }
        _ => Err(StorageRequestError::UnexpectedParameter {
            module: module.name.clone(),
            item: item.name.clone(),
        }),
    }
}
