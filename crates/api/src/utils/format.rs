//! Formatting utilities for hex encoding.

/// Format bytes as hex string with "0x" prefix
pub fn hex_with_prefix(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode a hex string, with or without the "0x" prefix
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(hex_str.strip_prefix("0x").unwrap_or(hex_str))
}
