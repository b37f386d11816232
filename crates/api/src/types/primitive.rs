//! Fixed-width unsigned integers and booleans.

use super::{WireType, expect_len};
use crate::error::CodecError;

/// Declares a little-endian unsigned integer wire type.
///
/// `U8` is the template: one byte, `create` stores the byte verbatim and
/// `encode` returns it unchanged. Wider widths follow the same rule with
/// `from_le_bytes`/`to_le_bytes`.
macro_rules! unsigned_wire_type {
    ($(#[$doc:meta])* $ident:ident, $inner:ty, $name:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $ident {
            bytes: Vec<u8>,
            value: $inner,
        }

        impl $ident {
            pub const NAME: &'static str = $name;
            pub const SIZE: usize = std::mem::size_of::<$inner>();

            pub fn new(value: $inner) -> Self {
                Self {
                    bytes: value.to_le_bytes().to_vec(),
                    value,
                }
            }
        }

        impl From<$inner> for $ident {
            fn from(value: $inner) -> Self {
                Self::new(value)
            }
        }

        impl WireType for $ident {
            type Value = $inner;

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
                let mut raw = [0u8; std::mem::size_of::<$inner>()];
                raw.copy_from_slice(bytes);
                self.value = <$inner>::from_le_bytes(raw);
                self.bytes = bytes.to_vec();
                Ok(())
            }

            /// Decimal, or hex when prefixed with `0x`.
            fn create_from_param(&mut self, param: &str) -> Result<(), CodecError> {
                let param = param.trim();
                if param.starts_with("0x") {
                    return self.create_from_hex(param);
                }
                let value = param.parse::<$inner>().map_err(|e| {
                    CodecError::format(Self::NAME, format!("'{}' is not a {}: {}", param, $name, e))
                })?;
                *self = Self::new(value);
                Ok(())
            }

            fn value(&self) -> &$inner {
                &self.value
            }

            fn bytes(&self) -> &[u8] {
                &self.bytes
            }

            // Integers render as decimal strings so u128 balances survive JSON.
            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::String(self.value.to_string())
            }
        }
    };
}

unsigned_wire_type!(
    /// Single byte.
    U8, u8, "u8"
);
unsigned_wire_type!(U16, u16, "u16");
unsigned_wire_type!(U32, u32, "u32");
unsigned_wire_type!(U64, u64, "u64");
unsigned_wire_type!(
    /// 16-byte integer, the usual `Balance` width.
    U128, u128, "u128"
);

/// SCALE boolean: `0x00` or `0x01`, anything else is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bool {
    bytes: Vec<u8>,
    value: bool,
}

impl Bool {
    pub const NAME: &'static str = "bool";

    pub fn new(value: bool) -> Self {
        Self {
            bytes: vec![value as u8],
            value,
        }
    }
}

impl From<bool> for Bool {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl WireType for Bool {
    type Value = bool;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn size(&self) -> usize {
        1
    }

    fn encode(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    fn create(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        expect_len(Self::NAME, 1, bytes)?;
        self.value = match bytes[0] {
            0 => false,
            1 => true,
            other => {
                return Err(CodecError::format(
                    Self::NAME,
                    format!("invalid boolean byte 0x{:02x}", other),
                ));
            }
        };
        self.bytes = bytes.to_vec();
        Ok(())
    }

    fn create_from_param(&mut self, param: &str) -> Result<(), CodecError> {
        match param.trim() {
            "true" => *self = Self::new(true),
            "false" => *self = Self::new(false),
            other => return self.create_from_hex(other),
        }
        Ok(())
    }

    fn value(&self) -> &bool {
        &self.value
    }

    fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Bool(self.value)
    }
}
