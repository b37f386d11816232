use crate::metadata::StorageHasher;
use sp_crypto_hashing::{blake2_128, blake2_256, twox_64, twox_128, twox_256};

/// Hash function used when deriving storage addresses.
pub trait StorageKeyHasher: Send + Sync {
    /// Hash `data`. Concat hashers return the digest followed by `data`.
    fn hash(&self, data: &[u8]) -> Vec<u8>;
}

impl StorageKeyHasher for StorageHasher {
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        match self {
            StorageHasher::Blake2_128 => blake2_128(data).to_vec(),
            StorageHasher::Blake2_256 => blake2_256(data).to_vec(),
            StorageHasher::Blake2_128Concat => {
                let mut result = blake2_128(data).to_vec();
                result.extend_from_slice(data);
                result
            }
            StorageHasher::Twox128 => twox_128(data).to_vec(),
            StorageHasher::Twox256 => twox_256(data).to_vec(),
            StorageHasher::Twox64Concat => {
                let mut result = twox_64(data).to_vec();
                result.extend_from_slice(data);
                result
            }
            StorageHasher::Identity => data.to_vec(),
        }
    }
}
