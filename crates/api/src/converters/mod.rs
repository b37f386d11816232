//! Name-keyed converters from chain-reported type names to wire types.

mod registry;

pub use registry::TypeRegistry;

use crate::error::CodecError;
use crate::types::{DecodedValue, WireType};
use std::marker::PhantomData;

/// Turns hex returned by the node into a typed value, and a human-supplied
/// parameter into wire bytes, for one named type.
pub trait TypeConverter: Send + Sync {
    fn type_name(&self) -> &str;

    fn create(&self, hex: &str) -> Result<Box<dyn DecodedValue>, CodecError>;

    fn encode_param(&self, param: &str) -> Result<Vec<u8>, CodecError>;
}

/// [`TypeConverter`] backed by a [`WireType`], registered under any alias.
pub struct WireTypeConverter<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: WireType> WireTypeConverter<T> {
    /// Converter named after the wire type itself, e.g. `u32`.
    pub fn new() -> Self {
        Self::with_name(T::default().name())
    }

    /// Converter for a chain alias such as `T::BlockNumber`.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _marker: PhantomData,
        }
    }
}

impl<T: WireType> Default for WireTypeConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: WireType> TypeConverter for WireTypeConverter<T> {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn create(&self, hex: &str) -> Result<Box<dyn DecodedValue>, CodecError> {
        Ok(Box::new(T::from_hex(hex)?))
    }

    fn encode_param(&self, param: &str) -> Result<Vec<u8>, CodecError> {
        Ok(T::from_param(param)?.encode())
    }
}
