use super::{WireType, expect_len};
use crate::error::CodecError;
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

/// 32-byte account identifier, rendered as an SS58 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountId {
    bytes: Vec<u8>,
    value: AccountId32,
}

impl AccountId {
    pub const NAME: &'static str = "AccountId";
    pub const SIZE: usize = 32;

    pub fn new(raw: [u8; 32]) -> Self {
        Self {
            bytes: raw.to_vec(),
            value: AccountId32::new(raw),
        }
    }

    /// SS58 address with the generic Substrate prefix (42).
    pub fn address(&self) -> String {
        self.value.to_ss58check()
    }

    pub fn address_with_prefix(&self, prefix: u16) -> String {
        self.value
            .to_ss58check_with_version(Ss58AddressFormat::custom(prefix))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            value: AccountId32::new([0u8; 32]),
        }
    }
}

impl From<AccountId32> for AccountId {
    fn from(value: AccountId32) -> Self {
        let raw: [u8; 32] = value.clone().into();
        Self {
            bytes: raw.to_vec(),
            value,
        }
    }
}

impl WireType for AccountId {
    type Value = AccountId32;

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
        let mut raw = [0u8; 32];
        raw.copy_from_slice(bytes);
        *self = Self::new(raw);
        Ok(())
    }

    /// SS58 address or 32-byte hex.
    fn create_from_param(&mut self, param: &str) -> Result<(), CodecError> {
        let param = param.trim();
        if param.starts_with("0x") {
            return self.create_from_hex(param);
        }
        let account = AccountId32::from_ss58check(param).map_err(|e| {
            CodecError::format(Self::NAME, format!("'{}' is not an SS58 address: {:?}", param, e))
        })?;
        *self = Self::from(account);
        Ok(())
    }

    fn value(&self) -> &AccountId32 {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::String(self.address())
    }
}
