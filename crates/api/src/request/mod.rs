//! Wire-ready requests: storage addresses and encoded calls.

mod hasher;
mod method;
mod storage;

pub use hasher::StorageKeyHasher;
pub use method::Method;
pub use storage::{StorageKeyBuilder, encode_key};
