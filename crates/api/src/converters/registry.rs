use super::{TypeConverter, WireTypeConverter};
use crate::error::RegistryError;
use crate::types::{AccountId, Bool, Hash, U8, U16, U32, U64, U128, WireType};
use std::collections::HashMap;
use std::sync::Arc;

/// Map from wire type name to its converter.
///
/// Populated once at startup and then shared read-only behind an `Arc`.
#[derive(Default, Clone)]
pub struct TypeRegistry {
    converters: HashMap<String, Arc<dyn TypeConverter>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in converters under the names chains report.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add_builtin::<U8>(&["u8"]);
        registry.add_builtin::<U16>(&["u16"]);
        registry.add_builtin::<U32>(&["u32", "BlockNumber", "T::BlockNumber"]);
        registry.add_builtin::<U64>(&["u64", "Moment", "T::Moment"]);
        registry.add_builtin::<U128>(&["u128", "Balance", "T::Balance"]);
        registry.add_builtin::<Bool>(&["bool"]);
        registry.add_builtin::<AccountId>(&["AccountId", "T::AccountId", "AccountId32"]);
        registry.add_builtin::<Hash>(&["Hash", "T::Hash", "H256"]);
        registry
    }

    fn add_builtin<T: WireType>(&mut self, names: &[&str]) {
        for name in names {
            self.converters.insert(
                (*name).to_string(),
                Arc::new(WireTypeConverter::<T>::with_name(*name)),
            );
        }
    }

    /// Fails when a converter with the same name is already present; the
    /// existing one is kept.
    pub fn register(&mut self, converter: impl TypeConverter + 'static) -> Result<(), RegistryError> {
        let name = converter.type_name().to_string();
        if self.converters.contains_key(&name) {
            return Err(RegistryError::DuplicateConverter(name));
        }
        self.converters.insert(name, Arc::new(converter));
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn TypeConverter, RegistryError> {
        self.converters
            .get(name)
            .map(|converter| converter.as_ref())
            .ok_or_else(|| RegistryError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.converters.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.converters.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
