pub mod format;

pub use format::{decode_hex, hex_with_prefix};
