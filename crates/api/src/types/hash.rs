use super::{WireType, expect_len};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use sp_core::H256;
use std::fmt;

/// 32-byte hash (block hash, storage root, ...).
///
/// Displays and serializes as `0x` followed by 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hash {
    bytes: Vec<u8>,
    value: H256,
}

impl Hash {
    pub const NAME: &'static str = "Hash";
    pub const SIZE: usize = 32;

    pub fn new(hash: H256) -> Self {
        Self {
            bytes: hash.as_bytes().to_vec(),
            value: hash,
        }
    }

    pub fn inner(&self) -> &H256 {
        &self.value
    }

    pub fn into_inner(self) -> H256 {
        self.value
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            value: H256::zero(),
        }
    }
}

impl From<H256> for Hash {
    fn from(hash: H256) -> Self {
        Self::new(hash)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self::new(H256::from(bytes))
    }
}

impl From<Hash> for H256 {
    fn from(hash: Hash) -> Self {
        hash.value
    }
}

impl WireType for Hash {
    type Value = H256;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn size(&self) -> usize {
        Self::SIZE
    }

    fn encode(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn create(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        expect_len(Self::NAME, Self::SIZE, bytes)?;
        *self = Self::new(H256::from_slice(bytes));
        Ok(())
    }

    fn value(&self) -> &H256 {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.to_string())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // H256's Debug is the full "0x..." form, Display abbreviates.
        write!(f, "{:?}", self.value)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
