// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! SCALE wire types.
//!
//! Every type the client can read from or write to the chain implements
//! [`WireType`]. A wire value keeps two views of the same data: the raw bytes in
//! wire order and the decoded in-memory value. The byte buffer is always the
//! little-endian wire representation; conversion to and from the native value
//! happens once, in `create`, with `from_le_bytes`/`to_le_bytes`. `encode`
//! therefore returns the stored buffer unchanged for every width.
//!
//! [`DecodedValue`] is the type-erased face of a wire value, returned by the
//! converter registry when the concrete type is only known at runtime.

pub mod account_id;
pub mod hash;
pub mod primitive;

pub use account_id::AccountId;
pub use hash::Hash;
pub use primitive::{Bool, U8, U16, U32, U64, U128};

use crate::error::CodecError;
use crate::utils::decode_hex;
use std::any::Any;
use std::fmt;

/// Encode/decode contract for a fixed-width SCALE type.
pub trait WireType: Default + fmt::Debug + Send + Sync + 'static {
    /// Decoded in-memory representation.
    type Value: Clone + fmt::Debug;

    /// Chain-facing type identifier, e.g. `u8` or `AccountId`.
    fn name(&self) -> &'static str;

    /// Encoded width in bytes.
    fn size(&self) -> usize;

    /// Wire encoding of the current value.
    fn encode(&self) -> Vec<u8>;

    /// Populate value and bytes from exactly `size()` wire bytes.
    fn create(&mut self, bytes: &[u8]) -> Result<(), CodecError>;

    /// Populate from a human-supplied parameter such as a storage key argument.
    ///
    /// Defaults to hex input; types with a natural text form override it.
    fn create_from_param(&mut self, param: &str) -> Result<(), CodecError> {
        self.create_from_hex(param)
    }

    fn value(&self) -> &Self::Value;

    fn bytes(&self) -> &[u8];

    /// JSON rendering used when printing decoded values.
    fn to_json(&self) -> serde_json::Value;

    /// Hex-decode (with or without `0x`) and delegate to [`WireType::create`].
    fn create_from_hex(&mut self, hex_str: &str) -> Result<(), CodecError> {
        let bytes =
            decode_hex(hex_str).map_err(|e| CodecError::format(self.name(), e.to_string()))?;
        self.create(&bytes)
    }

    /// Read `size()` bytes at `cursor` and advance it.
    ///
    /// On failure neither `cursor` nor `self` is modified.
    fn decode(&mut self, buffer: &[u8], cursor: &mut usize) -> Result<(), CodecError> {
        let size = self.size();
        let end = cursor
            .checked_add(size)
            .filter(|end| *end <= buffer.len())
            .ok_or(CodecError::OutOfRange {
                type_name: self.name(),
                cursor: *cursor,
                size,
                len: buffer.len(),
            })?;

        self.create(&buffer[*cursor..end])?;
        *cursor = end;
        Ok(())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let mut wire = Self::default();
        wire.create(bytes)?;
        Ok(wire)
    }

    fn from_hex(hex_str: &str) -> Result<Self, CodecError> {
        let mut wire = Self::default();
        wire.create_from_hex(hex_str)?;
        Ok(wire)
    }

    fn from_param(param: &str) -> Result<Self, CodecError> {
        let mut wire = Self::default();
        wire.create_from_param(param)?;
        Ok(wire)
    }
}

/// Reject input whose length differs from the fixed width of `type_name`.
pub(crate) fn expect_len(
    type_name: &'static str,
    expected: usize,
    bytes: &[u8],
) -> Result<(), CodecError> {
    if bytes.len() != expected {
        return Err(CodecError::format(
            type_name,
            format!("expected {} bytes, got {}", expected, bytes.len()),
        ));
    }
    Ok(())
}

/// A decoded wire value whose concrete type is only known at runtime.
pub trait DecodedValue: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;

    fn encoded(&self) -> Vec<u8>;

    fn to_json(&self) -> serde_json::Value;

    fn as_any(&self) -> &dyn Any;
}

impl<T: WireType> DecodedValue for T {
    fn type_name(&self) -> &'static str {
        self.name()
    }

    fn encoded(&self) -> Vec<u8> {
        self.encode()
    }

    fn to_json(&self) -> serde_json::Value {
        WireType::to_json(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn DecodedValue {
    pub fn downcast_ref<T: WireType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn is<T: WireType>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

impl fmt::Display for dyn DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
